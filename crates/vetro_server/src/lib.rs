//! Development server: serves modules on demand through the path resolver and
//! plugin transforms, with a static-asset fallback behind a filesystem access
//! boundary.

mod gateway;
mod outcome;
mod state;

pub use crate::outcome::RequestOutcome;
pub use crate::state::{ServerSessionState, SharedState};

use std::sync::Arc;

use axum::{http::Uri, routing::get, Router};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use vetro_common::BundlerOptions;
use vetro_plugin::Plugin;

pub struct DevServer {
  state: SharedState,
  shutdown: CancellationToken,
}

impl DevServer {
  pub fn new(options: BundlerOptions) -> Self {
    Self::with_plugins(options, Vec::new())
  }

  pub fn with_plugins(options: BundlerOptions, plugins: Vec<Arc<dyn Plugin>>) -> Self {
    Self {
      state: Arc::new(ServerSessionState::new(options, plugins)),
      shutdown: CancellationToken::new(),
    }
  }

  /// Token that stops the server; `serve` returns once it fires and all
  /// in-flight requests have finished.
  pub fn shutdown_token(&self) -> CancellationToken {
    self.shutdown.clone()
  }

  /// Bind and serve until shutdown. Per-request failures never end the
  /// session; only the shutdown token does.
  pub async fn serve(self) -> anyhow::Result<()> {
    let addr = format!("{}:{}", self.state.options().host, self.state.options().port);
    let listener = tokio::net::TcpListener::bind(&addr)
      .await
      .map_err(|err| anyhow::anyhow!("Failed to bind to {addr}: {err}"))?;

    tracing::info!("Dev server running at http://{addr}{}", self.state.options().base);

    let shutdown = self.shutdown.clone();
    let app = self.into_router();

    axum::serve(listener, app)
      .with_graceful_shutdown(async move { shutdown.cancelled().await })
      .await
      .map_err(|err| anyhow::anyhow!("Server error: {err}"))?;

    Ok(())
  }

  fn into_router(self) -> Router {
    Router::new()
      .fallback(get(handle_request))
      .layer(
        // Allow all origins during development.
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
      )
      .with_state(self.state)
  }
}

async fn handle_request(
  axum::extract::State(state): axum::extract::State<SharedState>,
  uri: Uri,
) -> RequestOutcome {
  gateway::resolve_request(&state, uri.path()).await
}
