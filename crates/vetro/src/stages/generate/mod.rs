mod render_chunk_to_assets;

use rustc_hash::FxHashMap;

use vetro_common::{ChunkIdx, ChunkKind};
use vetro_error::BuildResult;
use vetro_fs::OsFileSystem;

use crate::graph::ChunkGraph;
use crate::stages::scan::ScanStageOutput;
use crate::types::{bundle_output::BundleOutput, SharedOptions};

/// Turns the chunk partition into concrete output assets: names chunks,
/// renders their filenames and bodies, and picks up the static asset tree.
pub struct GenerateStage<'a> {
  scan_output: &'a mut ScanStageOutput,
  chunk_graph: &'a mut ChunkGraph,
  options: &'a SharedOptions,
  fs: OsFileSystem,
}

impl<'a> GenerateStage<'a> {
  pub fn new(
    scan_output: &'a mut ScanStageOutput,
    chunk_graph: &'a mut ChunkGraph,
    options: &'a SharedOptions,
    fs: OsFileSystem,
  ) -> Self {
    Self { scan_output, chunk_graph, options, fs }
  }

  pub fn generate(&mut self) -> BuildResult<BundleOutput> {
    let chunk_names = self.generate_chunk_names();
    self.render_chunk_to_assets(&chunk_names)
  }

  /// Chunk names must be stable across builds and os: entry chunks use the
  /// configured entry name, manual chunks their declared name, shared chunks
  /// the representative file name of their earliest module.
  fn generate_chunk_names(&self) -> FxHashMap<ChunkIdx, String> {
    let modules = &self.scan_output.module_table.modules;
    let mut used_names: FxHashMap<String, u32> = FxHashMap::default();
    let mut chunk_names = FxHashMap::default();

    for chunk_idx in &self.chunk_graph.sorted_chunk_idx_vec {
      let chunk = &self.chunk_graph.chunk_table[*chunk_idx];

      let base_name = match (&chunk.name, &chunk.kind) {
        (Some(name), _) => name.to_string(),
        (None, ChunkKind::EntryPoint { module, .. }) => modules[*module].repr_name().to_string(),
        (None, _) => chunk.representative_name(modules).to_string(),
      };

      let count = used_names.entry(base_name.clone()).or_insert(0);
      *count += 1;
      let unique = if *count == 1 { base_name } else { format!("{base_name}{count}") };

      chunk_names.insert(*chunk_idx, unique);
    }

    chunk_names
  }
}
