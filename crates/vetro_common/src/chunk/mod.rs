use arcstr::ArcStr;

use vetro_utils::bitset::BitSet;

use crate::{ChunkKind, FilenameTemplate, IndexModules, ModuleIdx, NormalizedBundlerOptions};

/// A named output grouping of modules emitted as one bundle file. Modules are
/// stored in execution order; `bits` records which entry points reach the
/// chunk's modules.
#[derive(Debug, Default)]
pub struct Chunk {
  pub kind: ChunkKind,
  pub modules: Vec<ModuleIdx>,
  pub name: Option<ArcStr>,
  pub bits: BitSet,
  /// Rendered output filename, assigned by the generate stage.
  pub filename: Option<String>,
}

impl Chunk {
  pub fn new(name: Option<ArcStr>, bits: BitSet, modules: Vec<ModuleIdx>, kind: ChunkKind) -> Self {
    Self { modules, name, bits, kind, filename: None }
  }

  pub fn filename_template<'options>(
    &self,
    options: &'options NormalizedBundlerOptions,
  ) -> FilenameTemplate<'options> {
    if matches!(self.kind, ChunkKind::EntryPoint { .. }) {
      FilenameTemplate::new(&options.entry_filenames)
    } else {
      FilenameTemplate::new(&options.chunk_filenames)
    }
  }

  /// Representative name for chunks without a user-provided one, taken from
  /// the first module in execution order.
  pub fn representative_name(&self, modules: &IndexModules) -> ArcStr {
    self
      .modules
      .first()
      .map(|idx| ArcStr::from(modules[*idx].repr_name()))
      .unwrap_or_else(|| arcstr::literal!("chunk"))
  }
}
