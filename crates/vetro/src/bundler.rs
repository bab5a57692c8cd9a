use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use vetro_common::BundlerOptions;
use vetro_error::BuildResult;
use vetro_fs::{FileSystem, OsFileSystem};
use vetro_plugin::{Plugin, PluginDriver};
use vetro_resolver::Resolver;

use crate::{
  stages::{chunk::ChunkStage, generate::GenerateStage, scan::ScanStage},
  types::{bundle_output::BundleOutput, SharedOptions, SharedPluginDriver, SharedResolver},
  utils::normalize_options::normalize_options,
};

pub struct Bundler {
  pub closed: bool,
  pub(crate) fs: OsFileSystem,
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver,
  pub(crate) plugins: SharedPluginDriver,
  cancel_token: CancellationToken,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> Self {
    Self::with_plugins(options, Vec::new())
  }

  pub fn with_plugins(options: BundlerOptions, plugins: Vec<Arc<dyn Plugin>>) -> Self {
    let options: SharedOptions = Arc::new(normalize_options(options));

    let resolver: SharedResolver = Resolver::new(
      options.cwd.clone(),
      options.alias.clone(),
      options.fs_allow.clone(),
      OsFileSystem,
    )
    .into();

    Bundler {
      closed: false,
      fs: OsFileSystem,
      options,
      resolver,
      plugins: Arc::new(PluginDriver::new(plugins)),
      cancel_token: CancellationToken::new(),
    }
  }

  /// Token for aborting an in-flight build; observed between module
  /// discovery steps.
  pub fn cancel_token(&self) -> CancellationToken {
    self.cancel_token.clone()
  }

  /// Bundle without touching the filesystem.
  pub async fn generate(&mut self) -> BuildResult<BundleOutput> {
    self.build(false).await
  }

  /// Bundle and write the output directory.
  pub async fn write(&mut self) -> BuildResult<BundleOutput> {
    self.build(true).await
  }

  pub fn close(&mut self) {
    self.closed = true;
  }

  async fn build(&mut self, is_write: bool) -> BuildResult<BundleOutput> {
    if self.closed {
      Err(anyhow::anyhow!(
        "Bundler is already closed, no more bundling is allowed."
      ))?;
    }

    let mut scan_stage = ScanStage::new(
      self.fs,
      self.options.clone(),
      self.resolver.clone(),
      self.plugins.clone(),
    );
    let mut scan_output = scan_stage.scan(self.cancel_token.clone()).await?;

    let mut chunk_stage =
      ChunkStage::new(&mut scan_output, &self.options, &self.resolver, &self.plugins);
    let mut chunk_graph = chunk_stage.chunk()?;

    let mut generate_stage =
      GenerateStage::new(&mut scan_output, &mut chunk_graph, &self.options, self.fs);
    let output = generate_stage.generate()?;

    if is_write {
      self.write_assets_to_disk(&output)?;
    }

    Ok(output)
  }

  fn write_assets_to_disk(&self, output: &BundleOutput) -> BuildResult<()> {
    let dir = self.options.out_dir();

    self
      .fs
      .create_dir_all(&dir)
      .map_err(|err| anyhow::anyhow!("Could not create {}: {err}", dir.display()))?;

    for asset in &output.assets {
      let dest = dir.join(asset.filename());
      if let Some(parent) = dest.parent() {
        self
          .fs
          .create_dir_all(parent)
          .map_err(|err| anyhow::anyhow!("Could not create {}: {err}", parent.display()))?;
      }
      self
        .fs
        .write(&dest, asset.content_as_bytes())
        .map_err(|err| anyhow::anyhow!("Failed to write {}: {err}", dest.display()))?;
    }

    tracing::info!(dir = %dir.display(), assets = output.assets.len(), "bundle written");

    Ok(())
  }
}
