use vetro_common::ModuleLoaderMsg;
use vetro_fs::OsFileSystem;

use crate::types::{SharedOptions, SharedPluginDriver, SharedResolver};

/// Used to store common data shared between all tasks.
pub struct TaskContext {
  pub fs: OsFileSystem,
  pub options: SharedOptions,
  pub resolver: SharedResolver,
  pub plugins: SharedPluginDriver,
  pub tx: tokio::sync::mpsc::Sender<ModuleLoaderMsg>,
}
