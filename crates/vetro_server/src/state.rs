use std::sync::Arc;

use arcstr::ArcStr;
use dashmap::DashMap;
use tokio::sync::OnceCell;

use vetro_common::{BundlerOptions, NormalizedBundlerOptions};
use vetro_fs::OsFileSystem;
use vetro_plugin::{Plugin, PluginDriver};
use vetro_resolver::Resolver;

pub type SharedState = Arc<ServerSessionState>;

/// A module compiled for serving, cached for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct CompiledModule {
  pub code: ArcStr,
  pub content_type: &'static str,
}

/// Process-wide state for one server session: the normalized configuration,
/// the resolver with its allow-listed roots, and the compile cache.
///
/// Everything except the cache is immutable after construction; the lifecycle
/// is `init -> serve* -> shutdown`, with no ambient globals. The cache maps
/// each module id to a once-cell so first-time compilation is single-flight:
/// concurrent requests for the same not-yet-compiled module await one
/// compilation instead of duplicating it, and a request dropped mid-compile
/// releases the claim to the next waiter.
pub struct ServerSessionState {
  options: Arc<NormalizedBundlerOptions>,
  resolver: Resolver,
  plugins: PluginDriver,
  pub(crate) fs: OsFileSystem,
  pub(crate) compile_cache: DashMap<ArcStr, Arc<OnceCell<CompiledModule>>>,
}

impl ServerSessionState {
  pub fn new(options: BundlerOptions, plugins: Vec<Arc<dyn Plugin>>) -> Self {
    let options = Arc::new(vetro::normalize_options(options));
    let resolver = Resolver::new(
      options.cwd.clone(),
      options.alias.clone(),
      options.fs_allow.clone(),
      OsFileSystem,
    );

    Self {
      options,
      resolver,
      plugins: PluginDriver::new(plugins),
      fs: OsFileSystem,
      compile_cache: DashMap::default(),
    }
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  pub fn resolver(&self) -> &Resolver {
    &self.resolver
  }

  pub fn plugins(&self) -> &PluginDriver {
    &self.plugins
  }

  /// The once-cell guarding compilation of `id`.
  pub(crate) fn compile_cell(&self, id: &ArcStr) -> Arc<OnceCell<CompiledModule>> {
    self
      .compile_cache
      .entry(id.clone())
      .or_insert_with(|| Arc::new(OnceCell::new()))
      .clone()
  }
}
