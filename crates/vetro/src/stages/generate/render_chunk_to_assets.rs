use std::path::Path;

use rustc_hash::FxHashMap;

use vetro_common::{ChunkIdx, OutputAsset, OutputAssetKind, SourceJoiner, StrOrBytes};
use vetro_error::{BuildResult, BundleError};
use vetro_fs::FileSystem;
use vetro_utils::{path_ext::PathExt, xxhash::xxhash_short};

use crate::types::bundle_output::BundleOutput;

use super::GenerateStage;

const HASH_LEN: usize = 8;

impl GenerateStage<'_> {
  pub(super) fn render_chunk_to_assets(
    &mut self,
    chunk_names: &FxHashMap<ChunkIdx, String>,
  ) -> BuildResult<BundleOutput> {
    let modules = &self.scan_output.module_table.modules;
    let mut assets = Vec::with_capacity(self.chunk_graph.chunk_table.len());

    for chunk_idx in &self.chunk_graph.sorted_chunk_idx_vec {
      let chunk = &self.chunk_graph.chunk_table[*chunk_idx];
      let name = &chunk_names[chunk_idx];

      let mut joiner = SourceJoiner::default();
      for module_idx in &chunk.modules {
        let Some(module) = modules[*module_idx].as_normal() else {
          continue;
        };
        if module.source.is_empty() {
          continue;
        }
        joiner.append_source(format!("// {}", module.stable_id));
        joiner.append_source(module.source.clone());
      }
      let content = joiner.join();

      let template = chunk.filename_template(self.options);
      let hash = template
        .has_hash_pattern()
        .then(|| xxhash_short(content.as_bytes(), HASH_LEN));
      let filename = template.render(name, hash.as_deref());

      self.chunk_graph.chunk_table[*chunk_idx].filename = Some(filename.clone());

      assets.push(OutputAsset {
        filename,
        content: StrOrBytes::Str(content),
        kind: OutputAssetKind::Chunk,
      });
    }

    self.copy_public_assets(&mut assets)?;

    Ok(BundleOutput { assets, warnings: std::mem::take(&mut self.scan_output.warnings) })
  }

  /// Files under the static asset root are copied into the output directory
  /// verbatim, keeping their sub-paths.
  fn copy_public_assets(&self, assets: &mut Vec<OutputAsset>) -> BuildResult<()> {
    let public_dir = &self.options.public_dir;
    if !self.fs.is_dir(public_dir) {
      return Ok(());
    }

    let mut stack = vec![public_dir.clone()];
    while let Some(dir) = stack.pop() {
      let entries = self.fs.read_dir(&dir).map_err(|source| BundleError::InternalReadFailure {
        path: dir.clone(),
        source,
      })?;

      for entry in entries {
        if self.fs.is_dir(&entry) {
          stack.push(entry);
        } else {
          let content = self.fs.read(&entry).map_err(|source| {
            BundleError::InternalReadFailure { path: entry.clone(), source }
          })?;
          let relative = entry
            .strip_prefix(public_dir)
            .unwrap_or_else(|_| Path::new("asset"))
            .expect_to_slash();

          assets.push(OutputAsset {
            filename: relative,
            content: StrOrBytes::Bytes(content),
            kind: OutputAssetKind::Asset,
          });
        }
      }
    }

    Ok(())
  }
}
