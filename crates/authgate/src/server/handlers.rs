//! Axum request handlers for the default application endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::protocol::{ErrorResponse, HealthResponse};
use super::state::AppState;

/// `GET /health` — liveness check.
///
/// Reaching this handler at all means the caller presented a valid client
/// certificate, so the response is unconditionally `200 OK`.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        server: state.server_name.as_ref().clone(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}
