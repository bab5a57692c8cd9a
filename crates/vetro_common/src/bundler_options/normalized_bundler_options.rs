use std::path::PathBuf;

use vetro_utils::indexmap::FxIndexMap;

use crate::{AliasItem, InputItem};

/// [crate::BundlerOptions] with every default filled in and every path made
/// absolute. Immutable for the lifetime of a build or server session.
#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,

  // --- Resolve
  /// Sorted longest prefix first so the longest match wins.
  pub alias: Vec<AliasItem>,

  // --- Output
  pub base: String,
  pub public_dir: PathBuf,
  pub dir: String,
  pub assets_dir: String,
  pub entry_filenames: String,
  pub chunk_filenames: String,
  pub manual_chunks: FxIndexMap<String, Vec<String>>,

  // --- Dev server
  pub host: String,
  pub port: u16,
  /// Allow-listed filesystem roots, absolute. Always contains `cwd`; may
  /// contain directories above it.
  pub fs_allow: Vec<PathBuf>,
}

impl NormalizedBundlerOptions {
  /// Absolute output directory.
  pub fn out_dir(&self) -> PathBuf {
    let dir = PathBuf::from(&self.dir);
    if dir.is_absolute() {
      dir
    } else {
      self.cwd.join(dir)
    }
  }
}
