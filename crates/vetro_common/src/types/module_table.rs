use arcstr::ArcStr;
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

use crate::{Module, ModuleIdx};

pub type IndexModules = IndexVec<ModuleIdx, Module>;

/// Arena storage for every module reachable from the entry points. Dependency
/// edges are `ModuleIdx` values, so every edge target is a key of this table
/// by construction.
#[derive(Debug, Default)]
pub struct ModuleTable {
  pub modules: IndexModules,
}

impl ModuleTable {
  pub fn new(modules: IndexModules) -> Self {
    Self { modules }
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  /// Reverse lookup from id to index, used by manual chunk resolution.
  pub fn id_to_idx(&self) -> FxHashMap<ArcStr, ModuleIdx> {
    self
      .modules
      .iter()
      .map(|module| (ArcStr::from(module.id().to_string()), module.idx()))
      .collect()
  }
}

impl std::ops::Index<ModuleIdx> for ModuleTable {
  type Output = Module;

  fn index(&self, idx: ModuleIdx) -> &Self::Output {
    &self.modules[idx]
  }
}

impl std::ops::IndexMut<ModuleIdx> for ModuleTable {
  fn index_mut(&mut self, idx: ModuleIdx) -> &mut Self::Output {
    &mut self.modules[idx]
  }
}
