use std::fmt::Debug;
use std::path::{Path, PathBuf};

use oxc_resolver::{ResolveOptions as OxcResolveOptions, Resolver as OxcResolver};

use crate::error::ResolveError;

/// Bare specifiers (`import "axios"`) are resolved by an external collaborator.
/// Anything that can map a package name seen from a directory to a file path
/// qualifies.
pub trait PackageResolver: Send + Sync + Debug {
  fn resolve_bare(&self, specifier: &str, importer_dir: &Path) -> Result<PathBuf, ResolveError>;
}

/// Default collaborator: node_modules resolution via `oxc_resolver`, set up
/// for browser builds.
#[derive(Debug)]
pub struct NpmPackageResolver {
  inner: OxcResolver,
}

impl NpmPackageResolver {
  pub fn new(extensions: &[&str]) -> Self {
    let options = OxcResolveOptions {
      extensions: extensions.iter().map(ToString::to_string).collect(),
      main_fields: vec!["browser".to_string(), "module".to_string(), "main".to_string()],
      condition_names: vec!["browser".to_string(), "import".to_string(), "default".to_string()],
      ..OxcResolveOptions::default()
    };

    Self { inner: OxcResolver::new(options) }
  }
}

impl PackageResolver for NpmPackageResolver {
  fn resolve_bare(&self, specifier: &str, importer_dir: &Path) -> Result<PathBuf, ResolveError> {
    match self.inner.resolve(importer_dir, specifier) {
      Ok(resolution) => Ok(resolution.path().to_path_buf()),
      Err(err) => {
        Err(ResolveError::Package { specifier: specifier.to_string(), reason: err.to_string() })
      }
    }
  }
}
