//! Request context middleware.
//!
//! Runs before every handler:
//! ```text
//!   x-request-id: abc  ──►  RequestContext { request_id: "abc",
//!   (or none: uuid v4)                       deadline: now + backend_timeout }
//!                               │
//!                               ├─ inserted as a request extension
//!                               ├─ "request" span with rid, method, path
//!                               └─ x-request-id echoed on the response
//! ```

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;
use warehouse_db::RequestContext;

use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_context(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let request_id = request_id(req.headers());

    req.extensions_mut()
        .insert(RequestContext::new(request_id.clone(), state.backend_timeout));

    let span = tracing::info_span!(
        parent: &state.root_span,
        "request",
        rid = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// The caller's request id, or a fresh one.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
