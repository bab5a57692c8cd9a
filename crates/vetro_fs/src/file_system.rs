use std::io;
use std::path::{Path, PathBuf};

/// The filesystem surface the bundler and dev server read through. Kept as a
/// trait so call sites never reach for `std::fs` directly.
pub trait FileSystem: Send + Sync {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  fn is_file(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;

  /// Immediate children of a directory.
  fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}
