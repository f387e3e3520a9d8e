/*
 * Responsibility
 * - Role-guarded operations (admin only / admin or auditor)
 * - Handlers trust the guard: by the time they run, the role check passed
 */
use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::api::v1::extractors::CurrentIdentity;
use crate::state::AppState;

pub async fn admin_status(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<Value> {
    let registry = state.access.registry();

    Json(json!({
        "sessionStore": state.identity_provider().backend_name(),
        "operations": registry.len(),
        "requestedBy": identity.user_id(),
    }))
}

pub async fn list_reports(CurrentIdentity(identity): CurrentIdentity) -> Json<Value> {
    Json(json!({
        "reports": [],
        "requestedBy": identity.user_id(),
    }))
}
