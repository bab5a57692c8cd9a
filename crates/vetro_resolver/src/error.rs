use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
  /// The specifier does not map to any existing file.
  #[error("Cannot find module \"{specifier}\"")]
  NotFound { specifier: String },

  /// The resolved path escapes every allow-listed root. Reported before any
  /// existence check so probing cannot leak filesystem structure.
  #[error("\"{}\" is outside of the allowed filesystem roots", path.display())]
  AccessDenied { path: PathBuf },

  /// The bare-specifier package resolver gave up. Terminal, never retried.
  #[error("Cannot resolve package \"{specifier}\": {reason}")]
  Package { specifier: String, reason: String },
}
