/*
 * Responsibility
 * - v1 URL structure
 * - The access declaration of every v1 operation, keyed by the full matched path
 */
use axum::{
    Router,
    http::Method,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    admin::{admin_status, list_reports},
    me::me,
    session::{logout, userinfo},
};
use crate::services::access::{AccessRegistry, AccessRequirement, EndpointId};
use crate::state::AppState;

pub const PREFIX: &str = "/api/v1";

const ME: EndpointId = EndpointId::new("me");
const ADMIN_STATUS: EndpointId = EndpointId::new("admin-status");
const REPORTS: EndpointId = EndpointId::new("reports");

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/userinfo", get(userinfo))
        .route("/me", get(me))
        .route("/admin/status", get(admin_status))
        .route("/reports", get(list_reports))
}

/// Access declarations for `routes()` once nested under `PREFIX`.
///
/// Logout and userinfo keep the default requirement: the exempt endpoint set
/// is what lets them through, not their declaration.
pub fn access_registry() -> AccessRegistry {
    AccessRegistry::builder()
        .operation(
            Method::POST,
            full_path("/auth/logout"),
            EndpointId::LOGOUT,
            AccessRequirement::default(),
        )
        .operation(
            Method::GET,
            full_path("/auth/userinfo"),
            EndpointId::USER_INFO,
            AccessRequirement::default(),
        )
        .operation(
            Method::GET,
            full_path("/me"),
            ME,
            AccessRequirement::user_logged_in(),
        )
        .operation(
            Method::GET,
            full_path("/admin/status"),
            ADMIN_STATUS,
            AccessRequirement::roles_allowed(["admin"]),
        )
        .operation(
            Method::GET,
            full_path("/reports"),
            REPORTS,
            AccessRequirement::roles_allowed(["admin", "auditor"]),
        )
        .build()
}

fn full_path(route: &str) -> String {
    format!("{PREFIX}{route}")
}
