//! Session gate: turns a token into a logged-in identity, or a deny.

use std::sync::Arc;

use axum::http::HeaderMap;

use super::decision::{AccessDecision, DenyReason};
use super::identity::Identity;
use super::requirement::AccessRequirement;
use super::token::TokenResolver;
use crate::services::identity::{IdentityProvider, ProviderError};

#[derive(Clone)]
pub struct SessionGate {
    provider: Arc<dyn IdentityProvider>,
    resolver: TokenResolver,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("provider", &self.provider.backend_name())
            .finish()
    }
}

impl SessionGate {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            resolver: TokenResolver,
        }
    }

    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.provider
    }

    /// Decide whether a request for an operation with `requirement` may go on.
    ///
    /// Authentication failures reported by the provider are logged and become
    /// a deny. Any other provider error is returned to the caller.
    pub async fn evaluate(
        &self,
        requirement: &AccessRequirement,
        identity: &mut Identity,
        headers: &HeaderMap,
    ) -> Result<AccessDecision, ProviderError> {
        if !requirement.requires_authentication() || identity.is_logged_in() {
            return Ok(AccessDecision::Proceed);
        }

        let Some(token) = self.resolver.resolve(headers) else {
            tracing::debug!("no session token presented");
            return Ok(AccessDecision::Deny(DenyReason::MissingToken));
        };

        let restored = match self.provider.restore_session(identity, &token).await {
            Ok(restored) => restored,
            Err(ProviderError::Authentication(err)) => {
                tracing::error!(
                    error = %err,
                    token = %token.fingerprint(),
                    backend = self.provider.backend_name(),
                    "authentication failed"
                );
                false
            }
            Err(err) => return Err(err),
        };

        if restored {
            tracing::debug!(
                token = %token.fingerprint(),
                user_id = ?identity.user_id(),
                "session restored"
            );
            Ok(AccessDecision::Proceed)
        } else {
            Ok(AccessDecision::Deny(DenyReason::SessionNotRestored))
        }
    }
}
