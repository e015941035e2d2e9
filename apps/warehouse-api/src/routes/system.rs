use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, error};

use crate::dto::HealthResponse;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    debug!("Health check");

    match state.engine.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse::new(true, env!("CARGO_PKG_VERSION"))),
        ),
        Err(e) => {
            error!(err = %e, "Health ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::new(false, env!("CARGO_PKG_VERSION"))),
            )
        }
    }
}
