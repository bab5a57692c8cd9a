use arcstr::ArcStr;
use oxc_index::{index_vec, IndexVec};
use rustc_hash::FxHashMap;

use vetro_common::{Chunk, ChunkIdx, ChunkKind, ModuleIdx};
use vetro_error::{BuildResult, BundleError};
use vetro_utils::bitset::BitSet;

use crate::graph::ChunkGraph;
use crate::utils::resolve_id::resolve_id;

use super::ChunkStage;

impl ChunkStage<'_> {
  /// Splits the graph into chunks. Manual groupings claim their modules
  /// first; everything else groups by which set of entry points reaches it,
  /// so a module shared by several entries lands in exactly one shared chunk.
  pub(super) fn generate_chunks(&mut self) -> BuildResult<ChunkGraph> {
    let modules = &self.scan_output.module_table.modules;
    let entries_len =
      u32::try_from(self.scan_output.entry_points.len()).expect("entry count fits u32");

    let mut chunk_graph = ChunkGraph::new(modules);

    let index_module_bits = self.determine_reachability(entries_len);

    // Manual groupings come first and win over the heuristic. A module
    // claimed twice is a configuration error, not a silent override.
    let module_to_manual_chunk = self.assign_manual_chunks(&mut chunk_graph, entries_len)?;

    // One synthetic chunk per user-defined entry point.
    let mut bits_to_chunk: FxHashMap<BitSet, ChunkIdx> = FxHashMap::default();
    for (index, entry) in self.scan_output.entry_points.iter().enumerate() {
      let bit = u32::try_from(index).expect("entry count fits u32");
      let mut bits = BitSet::new(entries_len);
      bits.set_bit(bit);

      let chunk_idx = chunk_graph.add_chunk(Chunk::new(
        entry.name.clone(),
        bits.clone(),
        Vec::new(),
        ChunkKind::EntryPoint { bit, module: entry.idx },
      ));
      chunk_graph.entry_module_to_entry_chunk.insert(entry.idx, chunk_idx);
      bits_to_chunk.insert(bits, chunk_idx);
    }

    // Remaining modules group by bit pattern: single-entry patterns merge
    // into that entry's chunk, multi-entry patterns form shared chunks.
    let modules = &self.scan_output.module_table.modules;
    for module in modules {
      if !module.is_normal() {
        continue;
      }
      let idx = module.idx();
      if module_to_manual_chunk.contains_key(&idx) {
        continue;
      }

      let bits = &index_module_bits[idx];
      debug_assert!(!bits.is_empty(), "discovered modules are reachable from an entry");

      let chunk_idx = match bits_to_chunk.get(bits) {
        Some(chunk_idx) => *chunk_idx,
        None => {
          let chunk_idx = chunk_graph
            .add_chunk(Chunk::new(None, bits.clone(), Vec::new(), ChunkKind::Common));
          bits_to_chunk.insert(bits.clone(), chunk_idx);
          chunk_idx
        }
      };
      chunk_graph.add_module_to_chunk(idx, chunk_idx);
    }

    // Union each chunk's bits over its members and order members by
    // execution.
    for chunk in &mut chunk_graph.chunk_table {
      for module_idx in &chunk.modules {
        chunk.bits.union(&index_module_bits[*module_idx]);
      }
      chunk.modules.sort_by_key(|module_idx| modules[*module_idx].exec_order());
    }

    let mut sorted_chunk_idx_vec = chunk_graph.chunk_table.indices().collect::<Vec<_>>();
    sorted_chunk_idx_vec.sort_by_key(|chunk_idx| {
      let chunk = &chunk_graph.chunk_table[*chunk_idx];
      let rank = match chunk.kind {
        ChunkKind::EntryPoint { .. } => 0u8,
        ChunkKind::Manual => 1,
        ChunkKind::Common => 2,
      };
      let first_exec = chunk
        .modules
        .first()
        .map_or(u32::MAX, |module_idx| modules[*module_idx].exec_order());
      (rank, first_exec)
    });
    chunk_graph.sorted_chunk_idx_vec = sorted_chunk_idx_vec;

    debug_assert!(
      modules
        .iter()
        .filter(|module| module.is_normal())
        .all(|module| chunk_graph.module_to_chunk[module.idx()].is_some()),
      "chunk assignment must cover every module"
    );

    Ok(chunk_graph)
  }

  /// Stamps each module with the set of entry points that can reach it,
  /// following both static and dynamic edges.
  fn determine_reachability(&self, entries_len: u32) -> IndexVec<ModuleIdx, BitSet> {
    let modules = &self.scan_output.module_table.modules;
    let mut index_module_bits: IndexVec<ModuleIdx, BitSet> =
      index_vec![BitSet::new(entries_len); modules.len()];

    for (index, entry) in self.scan_output.entry_points.iter().enumerate() {
      let bit = u32::try_from(index).expect("entry count fits u32");
      let mut stack = vec![entry.idx];
      while let Some(module_idx) = stack.pop() {
        if index_module_bits[module_idx].has_bit(bit) {
          continue;
        }
        index_module_bits[module_idx].set_bit(bit);
        stack.extend(
          modules[module_idx].import_records().iter().map(|rec| rec.resolved_module()),
        );
      }
    }

    index_module_bits
  }

  /// Resolves each `manual_chunks` group and claims its modules. A group
  /// whose members resolve to nothing still emits an (empty) chunk, since a
  /// configuration may reserve the name on purpose.
  fn assign_manual_chunks(
    &mut self,
    chunk_graph: &mut ChunkGraph,
    entries_len: u32,
  ) -> BuildResult<FxHashMap<ModuleIdx, ChunkIdx>> {
    let mut module_to_manual_chunk: FxHashMap<ModuleIdx, ChunkIdx> = FxHashMap::default();
    if self.options.manual_chunks.is_empty() {
      return Ok(module_to_manual_chunk);
    }

    let module_id_to_idx = self.scan_output.module_table.id_to_idx();
    let mut warnings: Vec<anyhow::Error> = Vec::new();

    for (name, members) in &self.options.manual_chunks {
      let chunk_name = ArcStr::from(name.as_str());
      let chunk_idx = chunk_graph.add_chunk(Chunk::new(
        Some(chunk_name.clone()),
        BitSet::new(entries_len),
        Vec::new(),
        ChunkKind::Manual,
      ));

      for member in members {
        let resolved = match resolve_id(self.resolver, self.plugins, member, None, false) {
          Ok(resolved) => resolved,
          Err(_) => {
            warnings.push(anyhow::anyhow!(
              "Could not resolve manual chunk member {member:?} of {name:?}, skipping it"
            ));
            continue;
          }
        };

        let Some(module_idx) = module_id_to_idx.get(&resolved.id).copied() else {
          warnings.push(anyhow::anyhow!(
            "Manual chunk member {member:?} of {name:?} is not part of the module graph, \
             skipping it"
          ));
          continue;
        };

        match module_to_manual_chunk.get(&module_idx) {
          Some(existing) if *existing == chunk_idx => {
            // Listed twice in the same group; harmless.
          }
          Some(existing) => {
            let first = chunk_graph.chunk_table[*existing]
              .name
              .clone()
              .unwrap_or_else(|| arcstr::literal!("<unnamed>"));
            Err(BundleError::ConfigurationConflict {
              id: self.scan_output.module_table[module_idx].stable_id().to_string(),
              first: first.to_string(),
              second: name.clone(),
            })?;
          }
          None => {
            module_to_manual_chunk.insert(module_idx, chunk_idx);
            chunk_graph.add_module_to_chunk(module_idx, chunk_idx);
          }
        }
      }
    }

    self.scan_output.warnings.extend(warnings);

    Ok(module_to_manual_chunk)
  }
}
