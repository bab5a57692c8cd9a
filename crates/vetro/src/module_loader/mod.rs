mod import_scanner;
mod module_task;
pub mod task_context;

use std::sync::Arc;

use arcstr::ArcStr;
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;

use vetro_common::{
  EntryPoint, EntryPointKind, ExternalModule, Module, ModuleIdx, ModuleLoaderMsg, ModuleTable,
  ModuleTaskResult, ResolvedId,
};
use vetro_error::{BuildResult, BundleError};
use vetro_fs::OsFileSystem;

use module_task::ModuleTask;
use task_context::TaskContext;

use crate::types::{SharedOptions, SharedPluginDriver, SharedResolver};

pub struct IntermediateModules {
  pub modules: IndexVec<ModuleIdx, Option<Module>>,
}

impl IntermediateModules {
  pub fn new() -> Self {
    Self { modules: IndexVec::new() }
  }

  pub fn alloc_module_idx(&mut self) -> ModuleIdx {
    self.modules.push(None)
  }
}

/// Discovers every module transitively reachable from the entry points.
///
/// One task runs per module; discovery is keyed by the resolved id through
/// `visited`, so two concurrent discoveries of the same id converge on the
/// first claim and the module is read and scanned exactly once.
pub struct ModuleLoader {
  tx: Sender<ModuleLoaderMsg>,
  rx: Receiver<ModuleLoaderMsg>,
  remaining: u32,
  shared_context: Arc<TaskContext>,
  inm: IntermediateModules,
  visited: FxHashMap<ArcStr, ModuleIdx>,
  cancel_token: CancellationToken,
}

pub struct ModuleLoaderOutput {
  // Stored all modules
  pub module_table: ModuleTable,
  // Entries that user defined
  pub entry_points: Vec<EntryPoint>,
  pub warnings: Vec<anyhow::Error>,
}

impl ModuleLoader {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    plugins: SharedPluginDriver,
    cancel_token: CancellationToken,
  ) -> Self {
    // 1024 should be enough for most cases
    // over 1024 pending tasks are insane
    let (tx, rx) = tokio::sync::mpsc::channel(1024);

    let shared_context =
      Arc::new(TaskContext { fs, resolver, plugins, options, tx: tx.clone() });

    Self {
      tx,
      rx,
      remaining: 0,
      shared_context,
      inm: IntermediateModules::new(),
      visited: FxHashMap::default(),
      cancel_token,
    }
  }

  fn try_spawn_new_task(&mut self, resolved_id: &ResolvedId, is_user_defined_entry: bool) -> ModuleIdx {
    if let Some(idx) = self.visited.get(&resolved_id.id) {
      return *idx;
    }

    let idx = self.inm.alloc_module_idx();
    self.visited.insert(resolved_id.id.clone(), idx);

    if resolved_id.is_external {
      // Externals have no source to fetch; record them synchronously.
      self.inm.modules[idx] = Some(ExternalModule::new(idx, resolved_id.id.clone()).into());
      return idx;
    }

    self.remaining += 1;

    let task =
      ModuleTask::new(Arc::clone(&self.shared_context), idx, resolved_id.clone(), is_user_defined_entry);
    tokio::spawn(task.run());

    idx
  }

  pub async fn fetch_all_modules(
    mut self,
    user_defined_entries: Vec<(Option<ArcStr>, ResolvedId)>,
  ) -> BuildResult<ModuleLoaderOutput> {
    self.inm.modules.reserve(user_defined_entries.len());

    let entry_points = user_defined_entries
      .into_iter()
      .map(|(name, info)| EntryPoint {
        idx: self.try_spawn_new_task(&info, true),
        name,
        kind: EntryPointKind::UserDefined,
      })
      .collect::<Vec<_>>();

    let mut errors: Vec<BundleError> = Vec::new();
    let mut warnings: Vec<anyhow::Error> = Vec::new();

    while self.remaining > 0 {
      // Cancellation is observed between discovery steps, never mid-module.
      let msg = tokio::select! {
        biased;
        () = self.cancel_token.cancelled() => Err(anyhow::anyhow!("Build cancelled"))?,
        msg = self.rx.recv() => msg,
      };

      let Some(msg) = msg else {
        break;
      };

      match msg {
        ModuleLoaderMsg::ModuleDone(task_result) => {
          let ModuleTaskResult { mut module, resolved_deps, warnings: task_warnings } =
            *task_result;
          warnings.extend(task_warnings);

          let import_records = module
            .as_normal()
            .map(|normal| {
              resolved_deps
                .iter_enumerated()
                .map(|(record_idx, dep)| {
                  let dep_idx = self.try_spawn_new_task(dep, false);
                  normal.raw_import_records[record_idx].clone_as_resolved(dep_idx)
                })
                .collect::<IndexVec<_, _>>()
            })
            .unwrap_or_default();

          module.set_import_records(import_records);
          let idx = module.idx();
          self.inm.modules[idx] = Some(module);
          self.remaining -= 1;
        }
        ModuleLoaderMsg::BuildErrors(errs) => {
          errors.extend(errs);
          self.remaining -= 1;
        }
      }
    }

    // A failed resolution poisons the whole build; partial graphs are
    // discarded rather than handed to the chunking stage.
    if !errors.is_empty() {
      return Err(errors)?;
    }

    let modules = self
      .inm
      .modules
      .into_iter()
      .map(|module| module.expect("Every discovered module must have completed"))
      .collect::<IndexVec<ModuleIdx, Module>>();

    Ok(ModuleLoaderOutput { module_table: ModuleTable::new(modules), entry_points, warnings })
  }
}
