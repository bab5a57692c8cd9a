use serde::Deserialize;

/// A prefix substitution applied before path resolution, e.g.
/// `{ find: "@", replacement: "./src" }`. Relative replacements are made
/// absolute against the project root during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasItem {
  pub find: String,
  pub replacement: String,
}

impl AliasItem {
  pub fn new(find: impl Into<String>, replacement: impl Into<String>) -> Self {
    Self { find: find.into(), replacement: replacement.into() }
  }
}
