use arcstr::ArcStr;

use super::module_id::ModuleId;

/// What the resolver hands back for a specifier: a canonical id plus whether
/// the module is external (left out of the graph's source set).
#[derive(Debug, Clone)]
pub struct ResolvedId {
  pub id: ArcStr,
  pub is_external: bool,
}

impl ResolvedId {
  pub fn module_id(&self) -> ModuleId {
    ModuleId::new(self.id.clone())
  }
}
