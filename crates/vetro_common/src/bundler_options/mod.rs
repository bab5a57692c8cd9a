pub mod alias_item;
pub mod filename_template;
pub mod input_item;
pub mod normalized_bundler_options;
pub mod server_options;

use std::path::PathBuf;

use serde::Deserialize;

use vetro_utils::indexmap::FxIndexMap;

use crate::{AliasItem, InputItem, ServerOptions};

/// The raw, user-facing configuration surface. Read once at startup (from the
/// CLI and/or a JSON config file) and normalized into
/// [NormalizedBundlerOptions] before anything runs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundlerOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,

  // --- Resolve
  pub alias: Option<Vec<AliasItem>>,

  // --- Output
  pub base: Option<String>,
  pub public_dir: Option<String>,
  pub dir: Option<String>,
  pub assets_dir: Option<String>,
  pub entry_filenames: Option<String>,
  pub chunk_filenames: Option<String>,
  pub manual_chunks: Option<FxIndexMap<String, Vec<String>>>,

  // --- Dev server
  pub server: Option<ServerOptions>,
}
