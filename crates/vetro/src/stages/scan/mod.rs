use arcstr::ArcStr;
use tokio_util::sync::CancellationToken;

use vetro_common::ResolvedId;
use vetro_error::{BuildResult, BundleError};
use vetro_fs::OsFileSystem;

use crate::{
  module_loader::{ModuleLoader, ModuleLoaderOutput},
  types::{SharedOptions, SharedPluginDriver, SharedResolver},
  utils::resolve_id::resolve_id,
};

pub type ScanStageOutput = ModuleLoaderOutput;

pub struct ScanStage {
  fs: OsFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
  plugins: SharedPluginDriver,
}

impl ScanStage {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    plugins: SharedPluginDriver,
  ) -> Self {
    Self { fs, options, resolver, plugins }
  }

  pub async fn scan(&mut self, cancel_token: CancellationToken) -> BuildResult<ScanStageOutput> {
    if self.options.input.is_empty() {
      Err(anyhow::anyhow!("You must supply options.input to vetro"))?;
    }

    let user_entries = self.resolve_user_defined_entries()?;

    let module_loader = ModuleLoader::new(
      self.fs,
      self.options.clone(),
      self.resolver.clone(),
      self.plugins.clone(),
      cancel_token,
    );

    let output = module_loader.fetch_all_modules(user_entries).await?;

    tracing::debug!(
      modules = output.module_table.len(),
      entries = output.entry_points.len(),
      "module graph complete"
    );

    Ok(output)
  }

  fn resolve_user_defined_entries(&mut self) -> BuildResult<Vec<(Option<ArcStr>, ResolvedId)>> {
    let mut ret = Vec::with_capacity(self.options.input.len());
    let mut errors: Vec<BundleError> = Vec::new();

    for input_item in &self.options.input {
      match resolve_id(&self.resolver, &self.plugins, &input_item.import, None, true) {
        Ok(resolved) => {
          if resolved.is_external {
            errors.push(
              anyhow::anyhow!(
                "Failed to resolve {:?} - entry can't be external",
                resolved.id.to_string()
              )
              .into(),
            );
            continue;
          }
          ret.push((input_item.name.clone().map(ArcStr::from), resolved));
        }
        Err(errs) => errors.extend(errs.0),
      }
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    Ok(ret)
  }
}
