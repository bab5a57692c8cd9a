use oxc_index::IndexVec;

use crate::{ImportRecordIdx, Module, ResolvedId};

/// What a module task hands back to the loader: the constructed module (raw
/// import records filled in, resolved ones pending) plus the resolver output
/// for each raw record, in the same order.
pub struct ModuleTaskResult {
  pub module: Module,
  pub resolved_deps: IndexVec<ImportRecordIdx, ResolvedId>,
  pub warnings: Vec<anyhow::Error>,
}
