use crate::ModuleIdx;

#[derive(Debug, Default, PartialEq, Eq)]
pub enum ChunkKind {
  /// One synthetic chunk per configured entry point.
  EntryPoint { bit: u32, module: ModuleIdx },
  /// A `manual_chunks` group, kept even when it resolves to zero modules.
  Manual,
  /// Modules reachable from more than one entry point.
  #[default]
  Common,
}
