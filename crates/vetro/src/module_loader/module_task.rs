use std::sync::Arc;

use arcstr::ArcStr;
use oxc_index::IndexVec;

use vetro_common::{
  ImportRecordIdx, ModuleIdx, ModuleLoaderMsg, ModuleTaskResult, NormalModule, RawImportRecord,
  ResolvedId, StrOrBytes,
};
use vetro_error::{BuildResult, BundleError};
use vetro_utils::{path_ext::PathExt, sanitize_file_name::sanitize_file_name};

use crate::module_loader::import_scanner::scan_imports;
use crate::utils::{load_source::load_source, resolve_id::resolve_id};

use super::task_context::TaskContext;

/// Reads, transforms and scans one module, then reports back to the loader.
/// Sibling tasks run concurrently; the loader guarantees one task per id.
pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  resolved_id: ResolvedId,
  is_user_defined_entry: bool,
}

impl ModuleTask {
  pub fn new(
    ctx: Arc<TaskContext>,
    idx: ModuleIdx,
    resolved_id: ResolvedId,
    is_user_defined_entry: bool,
  ) -> Self {
    Self { ctx, idx, resolved_id, is_user_defined_entry }
  }

  pub async fn run(mut self) {
    if let Err(errs) = self.run_inner().await {
      // The loader is gone when a build was cancelled mid-flight.
      self.ctx.tx.send(ModuleLoaderMsg::BuildErrors(errs.0)).await.ok();
    }
  }

  async fn run_inner(&mut self) -> BuildResult<()> {
    let module_id = self.resolved_id.module_id();

    let (content, module_type) = load_source(&self.ctx.fs, &self.resolved_id)?;

    let source: ArcStr = match content {
      StrOrBytes::Str(content) => {
        let transformed = self.ctx.plugins.transform(&module_id, &module_type, content)?;
        transformed.into()
      }
      // Binary assets participate in the graph but contribute no joinable
      // source; emission is a collaborator concern.
      StrOrBytes::Bytes(_) => ArcStr::default(),
    };

    let raw_import_records: IndexVec<ImportRecordIdx, RawImportRecord> =
      if module_type.is_scannable() {
        scan_imports(&source).into_iter().collect()
      } else {
        IndexVec::default()
      };

    let resolved_deps = self.resolve_dependencies(&raw_import_records)?;

    let stable_id = module_id.stabilize(&self.ctx.options.cwd);
    let repr_name = sanitize_file_name(&module_id.path().representative_file_name());

    let module = NormalModule {
      idx: self.idx,
      exec_order: u32::MAX,
      is_user_defined_entry: self.is_user_defined_entry,
      id: module_id,
      stable_id,
      repr_name,
      module_type,
      source,
      raw_import_records,
      import_records: IndexVec::default(),
    };

    let result = ModuleTaskResult { module: module.into(), resolved_deps, warnings: Vec::new() };

    self.ctx.tx.send(ModuleLoaderMsg::ModuleDone(Box::new(result))).await.ok();

    Ok(())
  }

  /// Resolves every raw record through the path resolver, collecting all
  /// failures so one bad import does not hide its siblings.
  fn resolve_dependencies(
    &self,
    dependencies: &IndexVec<ImportRecordIdx, RawImportRecord>,
  ) -> BuildResult<IndexVec<ImportRecordIdx, ResolvedId>> {
    let mut resolved = IndexVec::with_capacity(dependencies.len());
    let mut errors: Vec<BundleError> = Vec::new();

    for record in dependencies {
      match resolve_id(
        &self.ctx.resolver,
        &self.ctx.plugins,
        &record.specifier,
        Some(&self.resolved_id.id),
        false,
      ) {
        Ok(id) => {
          resolved.push(id);
        }
        Err(errs) => errors.extend(errs.0),
      }
    }

    if errors.is_empty() {
      Ok(resolved)
    } else {
      Err(errors)?
    }
  }
}
