use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;

use vetro_common::{ModuleId, ModuleType};
use vetro_fs::FileSystem;
use vetro_resolver::ResolveError;
use vetro_utils::mime::mime_type_from_path;

use crate::outcome::RequestOutcome;
use crate::state::{CompiledModule, ServerSessionState};

/// Request paths with one of these extensions go through the module pipeline;
/// everything else falls back to the static asset root.
const MODULE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "tsx", "json", "css"];

/// Absolute-path escape hatch, e.g. `/@fs/home/user/shared/lib.js`. Still
/// subject to the allow-listed roots.
const FS_PREFIX: &str = "@fs/";

/// One request, one terminal outcome: Serving, Denied or NotFound. No state
/// survives the request beyond the session's compile cache.
pub(crate) async fn resolve_request(state: &ServerSessionState, path: &str) -> RequestOutcome {
  let Some(rel) = strip_base(path, &state.options().base) else {
    return RequestOutcome::NotFound;
  };
  let rel = if rel.is_empty() { "index.html" } else { rel };

  if is_module_request(rel) {
    let specifier = match rel.strip_prefix(FS_PREFIX) {
      Some(absolute) => format!("/{absolute}"),
      None => format!("./{rel}"),
    };

    match state.resolver().resolve(None, &specifier) {
      Ok(resolved) => return serve_module(state, resolved.id, &resolved.path).await,
      Err(ResolveError::AccessDenied { .. }) => return RequestOutcome::Denied,
      // Not a known module. The static root may still have it.
      Err(_) => {}
    }
  }

  serve_static(state, rel)
}

async fn serve_module(state: &ServerSessionState, id: ArcStr, path: &Path) -> RequestOutcome {
  let module_id = ModuleId::new(id.clone());
  let module_type = module_id
    .path()
    .extension()
    .and_then(|ext| ext.to_str())
    .and_then(ModuleType::from_known_extension)
    .unwrap_or(ModuleType::Asset);

  // Binary modules are served raw; only text modules go through transforms.
  if module_type == ModuleType::Asset {
    return match state.fs.read(path) {
      Ok(content) => {
        RequestOutcome::Serving { content, content_type: mime_type_from_path(path) }
      }
      Err(err) => RequestOutcome::Failure(format!("Failed to read {}: {err}", path.display())),
    };
  }

  // Single-flight: the first request in claims the cell and compiles; every
  // concurrent request awaits that one compilation. If the compiling request
  // is dropped (client disconnect), the cell stays empty and the next waiter
  // takes over the claim.
  let cell = state.compile_cell(&id);
  let compiled = cell
    .get_or_try_init(|| compile_module(state, &module_id, &module_type, path))
    .await;

  match compiled {
    Ok(compiled) => RequestOutcome::Serving {
      content: compiled.code.as_bytes().to_vec(),
      content_type: compiled.content_type,
    },
    Err(failure) => RequestOutcome::Failure(failure),
  }
}

async fn compile_module(
  state: &ServerSessionState,
  module_id: &ModuleId,
  module_type: &ModuleType,
  path: &Path,
) -> Result<CompiledModule, String> {
  let source = state
    .fs
    .read_to_string(path)
    .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;

  let code = state
    .plugins()
    .transform(module_id, module_type, source)
    .map_err(|errs| {
      errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    })?;

  tracing::debug!(id = %module_id, "module compiled");

  Ok(CompiledModule { code: code.into(), content_type: mime_type_from_path(path) })
}

/// Static fallback. The joined path must stay under the static root and the
/// allow-listed roots; escaping either is Denied, never NotFound.
fn serve_static(state: &ServerSessionState, rel: &str) -> RequestOutcome {
  let public_dir = &state.options().public_dir;
  let candidate = public_dir.join(rel).normalize();

  if !candidate.starts_with(public_dir) || !state.resolver().is_path_allowed(&candidate) {
    return RequestOutcome::Denied;
  }

  if !state.fs.is_file(&candidate) {
    return RequestOutcome::NotFound;
  }

  match state.fs.read(&candidate) {
    Ok(content) => {
      RequestOutcome::Serving { content, content_type: mime_type_from_path(&candidate) }
    }
    Err(err) => RequestOutcome::Failure(format!("Failed to read {}: {err}", candidate.display())),
  }
}

fn strip_base<'p>(path: &'p str, base: &str) -> Option<&'p str> {
  if let Some(rest) = path.strip_prefix(base) {
    return Some(rest);
  }
  // `/app` for base `/app/` is the index request.
  if base.len() > 1 && base.trim_end_matches('/') == path {
    return Some("");
  }
  None
}

fn is_module_request(rel: &str) -> bool {
  if rel.starts_with(FS_PREFIX) {
    return true;
  }
  Path::new(rel)
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| MODULE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
  use std::borrow::Cow;
  use std::path::Path;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  use vetro_common::{BundlerOptions, ModuleId, ModuleType, ServerOptions};
  use vetro_error::BuildResult;
  use vetro_plugin::Plugin;

  use super::resolve_request;
  use crate::outcome::RequestOutcome;
  use crate::state::ServerSessionState;

  fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
  }

  fn fixture() -> (tempfile::TempDir, ServerSessionState) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");
    write(&root, "src/main.js", "import './dep.js'\nexport const main = 1\n");
    write(&root, "src/dep.js", "export const dep = 2\n");
    write(&root, "public/logo.svg", "<svg/>");
    write(&root, "public/vendor.js", "window.legacy = true\n");

    let state = ServerSessionState::new(
      BundlerOptions { cwd: Some(root), ..BundlerOptions::default() },
      Vec::new(),
    );
    (dir, state)
  }

  #[tokio::test]
  async fn serves_a_module_with_its_content_type() {
    let (_dir, state) = fixture();
    let outcome = resolve_request(&state, "/src/main.js").await;
    match outcome {
      RequestOutcome::Serving { content, content_type } => {
        assert_eq!(content_type, "text/javascript");
        assert!(String::from_utf8_lossy(&content).contains("export const main"));
      }
      other => panic!("expected Serving, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn traversal_outside_all_roots_is_denied_not_notfound() {
    let (_dir, state) = fixture();
    for path in ["/../../etc/passwd", "/../../../etc/shadow.js", "/@fs/etc/passwd.js"] {
      let outcome = resolve_request(&state, path).await;
      assert!(matches!(outcome, RequestOutcome::Denied), "{path} should be Denied, got {outcome:?}");
    }
  }

  #[tokio::test]
  async fn static_assets_fall_back_to_the_public_root() {
    let (_dir, state) = fixture();
    match resolve_request(&state, "/logo.svg").await {
      RequestOutcome::Serving { content_type, .. } => assert_eq!(content_type, "image/svg+xml"),
      other => panic!("expected Serving, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn a_missing_asset_inside_the_root_is_notfound() {
    let (_dir, state) = fixture();
    let outcome = resolve_request(&state, "/missing.png").await;
    assert!(matches!(outcome, RequestOutcome::NotFound), "got {outcome:?}");
  }

  #[tokio::test]
  async fn unknown_module_paths_fall_back_to_static_files() {
    let (_dir, state) = fixture();
    match resolve_request(&state, "/vendor.js").await {
      RequestOutcome::Serving { content, .. } => {
        assert!(String::from_utf8_lossy(&content).contains("window.legacy"));
      }
      other => panic!("expected Serving, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn the_base_prefix_scopes_every_request() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");
    write(&root, "src/main.js", "export {}\n");

    let state = ServerSessionState::new(
      BundlerOptions {
        cwd: Some(root),
        base: Some("app".to_string()),
        ..BundlerOptions::default()
      },
      Vec::new(),
    );

    assert!(resolve_request(&state, "/app/src/main.js").await.is_serving());
    assert!(matches!(resolve_request(&state, "/src/main.js").await, RequestOutcome::NotFound));
  }

  #[tokio::test]
  async fn parent_allowance_admits_modules_above_the_project_root() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = dir.path().join("workspace");
    write(&workspace, "shared/util.js", "export const util = 1\n");
    write(&workspace, "app/src/main.js", "export {}\n");

    let state = ServerSessionState::new(
      BundlerOptions {
        cwd: Some(workspace.join("app")),
        server: Some(ServerOptions {
          fs_allow: Some(vec!["..".to_string()]),
          ..ServerOptions::default()
        }),
        ..BundlerOptions::default()
      },
      Vec::new(),
    );

    let path = format!("/@fs{}", workspace.join("shared/util.js").display());
    assert!(resolve_request(&state, &path).await.is_serving(), "path {path}");
  }

  #[derive(Debug)]
  struct CountingPlugin(AtomicUsize);

  impl Plugin for CountingPlugin {
    fn name(&self) -> Cow<'static, str> {
      Cow::Borrowed("counting")
    }

    fn transform(
      &self,
      _id: &ModuleId,
      _module_type: &ModuleType,
      code: &str,
    ) -> BuildResult<Option<String>> {
      self.0.fetch_add(1, Ordering::SeqCst);
      Ok(Some(code.to_string()))
    }
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_requests_share_one_compilation() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");
    write(&root, "src/main.js", "export const main = 1\n");

    let counter = Arc::new(CountingPlugin(AtomicUsize::new(0)));
    let plugin: Arc<dyn Plugin> = counter.clone();
    let state = Arc::new(ServerSessionState::new(
      BundlerOptions { cwd: Some(root), ..BundlerOptions::default() },
      vec![plugin],
    ));

    let outcomes = futures::future::join_all(
      (0..16).map(|_| {
        let state = Arc::clone(&state);
        async move { resolve_request(&state, "/src/main.js").await }
      }),
    )
    .await;

    assert!(outcomes.iter().all(RequestOutcome::is_serving));
    assert_eq!(counter.0.load(Ordering::SeqCst), 1, "compilation must be single-flight");
  }
}
