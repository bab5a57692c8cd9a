mod code_splitting;
mod sort_modules;

use vetro_error::BuildResult;

use crate::graph::ChunkGraph;
use crate::stages::scan::ScanStageOutput;
use crate::types::{SharedOptions, SharedPluginDriver, SharedResolver};

/// Partitions the finished module graph into output chunks: execution order
/// first, then manual groupings, then the shared-dependency heuristic for
/// everything left.
pub struct ChunkStage<'a> {
  scan_output: &'a mut ScanStageOutput,
  options: &'a SharedOptions,
  resolver: &'a SharedResolver,
  plugins: &'a SharedPluginDriver,
}

impl<'a> ChunkStage<'a> {
  pub fn new(
    scan_output: &'a mut ScanStageOutput,
    options: &'a SharedOptions,
    resolver: &'a SharedResolver,
    plugins: &'a SharedPluginDriver,
  ) -> Self {
    Self { scan_output, options, resolver, plugins }
  }

  pub fn chunk(&mut self) -> BuildResult<ChunkGraph> {
    self.sort_modules();
    let chunk_graph = self.generate_chunks()?;

    tracing::debug!(chunks = chunk_graph.chunk_table.len(), "code splitting complete");

    Ok(chunk_graph)
  }
}
