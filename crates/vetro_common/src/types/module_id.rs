use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;

/// `ModuleId` is the unique string identifier for each module.
/// - An absolute filesystem path, optionally followed by a `?query` variant
///   tag so the same file can participate as distinct resources.
/// - Assigned once when the module is first discovered and never changed.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  /// The filesystem path portion, with any `?query` suffix stripped.
  pub fn path(&self) -> &Path {
    Path::new(self.path_str())
  }

  pub fn path_str(&self) -> &str {
    self.0.split('?').next().unwrap_or(&self.0)
  }

  /// The `?query` variant tag, if any, without the leading `?`.
  pub fn query(&self) -> Option<&str> {
    self.0.split_once('?').map(|(_, query)| query)
  }

  /// A form that is stable across machines, for diagnostics and chunk names.
  pub fn stabilize(&self, cwd: &Path) -> String {
    let path = self.path();
    if path.is_absolute() {
      let stabilized = path.relative(cwd).as_path().to_slash_lossy().into_owned();
      match self.query() {
        Some(query) => format!("{stabilized}?{query}"),
        None => stabilized,
      }
    } else {
      self.to_string()
    }
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl std::fmt::Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}
