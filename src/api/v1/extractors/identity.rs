use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AccessDenied;
use crate::services::access::{DenyReason, Identity};

/// Identity the access middleware settled on for this request.
///
/// Only present on routes behind the access layer. Anywhere else the
/// extractor answers like a session denial.
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AccessDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AccessDenied(DenyReason::SessionNotRestored))
    }
}
