use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

/// A single failure produced while building or serving.
///
/// Resolution failures and manual chunk conflicts abort the whole build and
/// carry enough context to point at the offending configuration or import.
/// Cyclic imports are deliberately absent here, they are warnings.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
  #[error("Could not resolve \"{specifier}\" from \"{importer}\".")]
  ResolutionFailure { specifier: String, importer: String },

  #[error("Could not resolve entry module \"{specifier}\".")]
  UnresolvedEntry { specifier: String },

  #[error("\"{}\" is outside of all allowed filesystem roots.", path.display())]
  AccessBoundaryViolation { path: PathBuf },

  #[error(
    "Module \"{id}\" is claimed by both manual chunks \"{first}\" and \"{second}\". \
     A module may only belong to one manual chunk."
  )]
  ConfigurationConflict { id: String, first: String, second: String },

  #[error("Failed to read \"{}\": {source}", path.display())]
  InternalReadFailure {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Anyhow(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct BuildError(pub Vec<BundleError>);

impl Deref for BuildError {
  type Target = Vec<BundleError>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<BundleError> for BuildError {
  fn from(error: BundleError) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<BundleError>> for BuildError {
  fn from(errors: Vec<BundleError>) -> Self {
    Self(errors)
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![BundleError::Anyhow(error)])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors.into_iter().map(BundleError::Anyhow).collect())
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;
