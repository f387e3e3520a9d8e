//! Access middleware: session gate + guard hook for every routed operation.
//!
//! - The operation is identified by method + `MatchedPath`, so this must be
//!   installed with `route_layer` (after routing).
//! - An upstream layer may pre-insert an authenticated `Identity` into the
//!   request extensions; otherwise the request starts anonymous.
//! - On success the identity (possibly restored from the token) is inserted
//!   into the extensions for handlers (`CurrentIdentity`).

use axum::{
    Router,
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::error::{AccessDenied, AppError};
use crate::services::access::{AccessDecision, Identity, OperationKey};
use crate::state::AppState;

/// Install the access middleware on every route already added to `router`.
///
/// ```ignore
/// let gated = Router::new().nest("/api/v1", api::v1::routes());
/// let gated = middleware::auth::access::apply(gated, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: runs only for matched routes, so MatchedPath is present.
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let operation = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| OperationKey::new(req.method().clone(), path.as_str()));

    let mut identity = req.extensions_mut().remove::<Identity>().unwrap_or_default();

    let decision = state
        .access
        .handle(req.headers(), operation.as_ref(), &mut identity)
        .await
        .map_err(|err| {
            tracing::error!(
                error = %err,
                operation = ?operation.as_ref().map(ToString::to_string),
                "identity provider failure"
            );
            AppError::from(err)
        })?;

    let decision = match decision {
        AccessDecision::Proceed => state.access.authorize(operation.as_ref(), &identity),
        denied => denied,
    };

    if let AccessDecision::Deny(reason) = decision {
        tracing::info!(
            operation = ?operation.as_ref().map(ToString::to_string),
            user_id = ?identity.user_id(),
            reason = %reason,
            "request denied"
        );
        return Ok(AccessDenied(reason).into_response());
    }

    // middleware → extractor
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
