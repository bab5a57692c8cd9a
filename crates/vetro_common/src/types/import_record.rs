use std::fmt::Debug;

use arcstr::ArcStr;

use crate::{ImportKind, ModuleIdx};

/// An import record freshly scanned out of a module, before resolution.
pub type RawImportRecord = ImportRecord<()>;
/// The same record once its specifier maps to a module in the graph.
pub type ResolvedImportRecord = ImportRecord<ModuleIdx>;

#[derive(Debug)]
pub struct ImportRecord<State: Debug> {
  pub state: State,
  /// `./lib.js` in `import { foo } from './lib.js';`, exactly as written.
  pub specifier: ArcStr,
  pub kind: ImportKind,
}

impl RawImportRecord {
  pub fn new(specifier: ArcStr, kind: ImportKind) -> Self {
    Self { specifier, kind, state: () }
  }

  /// Clone-based so the raw record stays owned by its module.
  pub fn clone_as_resolved(&self, resolved_module: ModuleIdx) -> ResolvedImportRecord {
    ResolvedImportRecord {
      state: resolved_module,
      specifier: self.specifier.clone(),
      kind: self.kind,
    }
  }
}

impl ResolvedImportRecord {
  pub fn resolved_module(&self) -> ModuleIdx {
    self.state
  }
}
