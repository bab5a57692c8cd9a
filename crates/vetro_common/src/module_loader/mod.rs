pub mod task_result;

use task_result::ModuleTaskResult;

pub enum ModuleLoaderMsg {
  ModuleDone(Box<ModuleTaskResult>),
  BuildErrors(Vec<vetro_error::BundleError>),
}
