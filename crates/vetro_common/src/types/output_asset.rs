use super::str_or_bytes::StrOrBytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAssetKind {
  /// Rendered from a chunk of the module graph.
  Chunk,
  /// Copied verbatim from the static asset root.
  Asset,
}

#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: String,
  pub content: StrOrBytes,
  pub kind: OutputAssetKind,
}

impl OutputAsset {
  pub fn filename(&self) -> &str {
    &self.filename
  }

  pub fn content_as_bytes(&self) -> &[u8] {
    self.content.as_bytes()
  }

  pub fn is_chunk(&self) -> bool {
    matches!(self.kind, OutputAssetKind::Chunk)
  }
}
