use serde::Deserialize;

/// Raw dev server configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerOptions {
  pub host: Option<String>,
  pub port: Option<u16>,
  /// Allow-listed filesystem roots; relative entries (including "..") are
  /// resolved against the project root.
  pub fs_allow: Option<Vec<String>>,
}
