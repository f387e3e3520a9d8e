/*
 * Responsibility
 * - POST /api/v1/auth/logout: drop the session, expire the cookie
 * - GET /api/v1/auth/userinfo: report the login state without ever denying
 * - Both endpoints are exempt from the session gate, so they resolve the
 *   token themselves
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};

use crate::api::v1::dto::session::{LoginStatus, UserInfoResponse};
use crate::api::v1::extractors::CurrentIdentity;
use crate::error::AppError;
use crate::services::access::{AUTH_TOKEN, TokenResolver};
use crate::services::identity::ProviderError;
use crate::state::AppState;

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = TokenResolver.resolve(&headers) {
        state
            .identity_provider()
            .invalidate_session(&token)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to invalidate session");
                AppError::from(err)
            })?;
        tracing::info!(token = %token.fingerprint(), "session invalidated");
    }

    Ok((
        [(header::SET_COOKIE, expired_token_cookie())],
        Json(LoginStatus::logged_out()),
    ))
}

pub async fn userinfo(
    State(state): State<AppState>,
    headers: HeaderMap,
    CurrentIdentity(mut identity): CurrentIdentity,
) -> Result<Json<UserInfoResponse>, AppError> {
    if !identity.is_logged_in()
        && let Some(token) = TokenResolver.resolve(&headers)
    {
        match state
            .identity_provider()
            .restore_session(&mut identity, &token)
            .await
        {
            Ok(_) => {}
            Err(ProviderError::Authentication(err)) => {
                tracing::debug!(error = %err, token = %token.fingerprint(), "userinfo without a session");
                identity.clear();
            }
            Err(err) => {
                tracing::error!(error = %err, "identity provider failure");
                return Err(err.into());
            }
        }
    }

    Ok(Json(UserInfoResponse::from(&identity)))
}

fn expired_token_cookie() -> String {
    format!("{AUTH_TOKEN}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
