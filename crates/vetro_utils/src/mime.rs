use std::path::Path;

/// Extension to content type, for served modules and static assets.
/// Unknown extensions fall back to `application/octet-stream`.
static MIME_TYPES: phf::Map<&'static str, &'static str> = phf::phf_map! {
  "js" => "text/javascript",
  "mjs" => "text/javascript",
  "cjs" => "text/javascript",
  "jsx" => "text/javascript",
  "ts" => "text/javascript",
  "tsx" => "text/javascript",
  "json" => "application/json",
  "css" => "text/css",
  "html" => "text/html",
  "htm" => "text/html",
  "svg" => "image/svg+xml",
  "png" => "image/png",
  "jpg" => "image/jpeg",
  "jpeg" => "image/jpeg",
  "gif" => "image/gif",
  "webp" => "image/webp",
  "ico" => "image/x-icon",
  "avif" => "image/avif",
  "txt" => "text/plain",
  "xml" => "text/xml",
  "pdf" => "application/pdf",
  "wasm" => "application/wasm",
  "woff" => "font/woff",
  "woff2" => "font/woff2",
  "ttf" => "font/ttf",
  "otf" => "font/otf",
  "mp4" => "video/mp4",
  "webm" => "video/webm",
  "mp3" => "audio/mpeg",
};

pub fn mime_type_from_path(path: &Path) -> &'static str {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .and_then(|ext| MIME_TYPES.get(ext.to_ascii_lowercase().as_str()).copied())
    .unwrap_or("application/octet-stream")
}
