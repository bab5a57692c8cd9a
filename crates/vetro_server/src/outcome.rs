use axum::{
  body::Body,
  http::{header, StatusCode},
  response::{IntoResponse, Response},
};

/// Every request terminates in exactly one of these. Paths escaping the
/// allowed roots are `Denied` rather than `NotFound`, whether or not the
/// target exists, so probing cannot map the filesystem.
#[derive(Debug)]
pub enum RequestOutcome {
  Serving { content: Vec<u8>, content_type: &'static str },
  Denied,
  NotFound,
  /// An external collaborator failed mid-request (e.g. an unreadable file).
  /// Fails the request, never the session.
  Failure(String),
}

impl RequestOutcome {
  pub fn is_serving(&self) -> bool {
    matches!(self, Self::Serving { .. })
  }
}

impl IntoResponse for RequestOutcome {
  fn into_response(self) -> Response {
    match self {
      Self::Serving { content, content_type } => Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(content))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
      Self::Denied => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
      Self::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      Self::Failure(message) => (StatusCode::INTERNAL_SERVER_ERROR, message).into_response(),
    }
  }
}
