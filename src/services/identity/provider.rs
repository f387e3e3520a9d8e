use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::services::access::{Identity, Token};
use crate::services::cache::CacheError;

/// The token did not yield a session. Recoverable: the session gate logs it
/// and denies the request.
#[derive(Debug, Error)]
pub enum AuthenticationFailure {
    #[error("unknown session token")]
    UnknownToken,
    #[error("session expired at {0}")]
    Expired(DateTime<Utc>),
}

/// Errors surfaced by an identity provider.
///
/// Only `Authentication` is absorbed by the session gate. Everything else is
/// a server fault and propagates (500).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationFailure),

    #[error("session store error: {0}")]
    Backend(#[from] CacheError),

    #[error("corrupt session record: {0}")]
    CorruptRecord(#[from] serde_json::Error),
}

/// Verifies tokens and reconstitutes identities.
///
/// Implementations must be cheap to share (`Arc<dyn IdentityProvider>`).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    // Backend name, for logs.
    fn backend_name(&self) -> &'static str;

    // Restore the session behind `token` into `identity`.
    //
    // Returns:
    // - Ok(true)  => identity is now logged in
    // - Ok(false) => token known but no session could be established
    // - Err(ProviderError::Authentication(_)) => invalid / expired token
    // - Err(_)    => backend failure
    async fn restore_session(
        &self,
        identity: &mut Identity,
        token: &Token,
    ) -> Result<bool, ProviderError>;

    // Drop the session behind `token`. Unknown tokens are not an error.
    async fn invalidate_session(&self, token: &Token) -> Result<(), ProviderError>;
}
