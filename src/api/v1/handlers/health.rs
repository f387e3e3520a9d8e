/*
 * Responsibility
 * - GET /health (liveness), mounted outside the access layer
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "sessionStore": state.identity_provider().backend_name(),
        })),
    )
}
