use std::path::Path;

use vetro_common::ResolvedId;
use vetro_error::{BuildResult, BundleError};
use vetro_plugin::PluginDriver;
use vetro_resolver::{ResolveError, Resolver};

#[inline]
fn is_http_url(s: &str) -> bool {
  s.starts_with("http://") || s.starts_with("https://") || s.starts_with("//")
}

#[inline]
fn is_data_url(s: &str) -> bool {
  s.trim_start().starts_with("data:")
}

pub fn resolve_id(
  resolver: &Resolver,
  plugins: &PluginDriver,
  request: &str,
  importer: Option<&str>,
  is_user_defined_entry: bool,
) -> BuildResult<ResolvedId> {
  // Auto external http url or data url
  if is_http_url(request) || is_data_url(request) {
    return Ok(ResolvedId { id: request.to_string().into(), is_external: true });
  }

  // A plugin may claim the specifier outright.
  if let Some(id) = plugins.resolve_id(request, importer) {
    return Ok(ResolvedId { id: id.into(), is_external: false });
  }

  let resolved = resolver.resolve(importer.map(Path::new), request);

  match resolved {
    Ok(resolved) => Ok(ResolvedId { id: resolved.id, is_external: false }),
    Err(ResolveError::AccessDenied { path }) => {
      Err(BundleError::AccessBoundaryViolation { path })?
    }
    Err(err) => {
      tracing::debug!(specifier = request, error = %err, "resolution failed");
      if is_user_defined_entry {
        Err(BundleError::UnresolvedEntry { specifier: request.to_string() }.into())
      } else {
        Err(
          BundleError::ResolutionFailure {
            specifier: request.to_string(),
            importer: importer.unwrap_or("<unknown>").to_string(),
          }
          .into(),
        )
      }
    }
  }
}
