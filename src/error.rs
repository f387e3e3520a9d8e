/*
 * Responsibility
 * - Shared AppError and its IntoResponse (HTTP status / JSON error body)
 * - Access denials: always 403 `{"loggedIn": false}`, whatever the reason
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::v1::dto::session::LoginStatus;
use crate::services::access::DenyReason;
use crate::services::identity::ProviderError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ProviderError> for AppError {
    fn from(_: ProviderError) -> Self {
        // Authentication failures never get here; the session gate absorbs them.
        AppError::Internal
    }
}

/// Terminal response for a denied request.
///
/// The reason stays server-side (logged by the middleware); session and role
/// denials look the same to the caller.
#[derive(Debug, Clone, Copy)]
pub struct AccessDenied(pub DenyReason);

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, Json(LoginStatus::logged_out())).into_response()
    }
}
