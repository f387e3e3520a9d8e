use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::services::access::{Identity, Token};
use crate::services::cache::{CacheClient, CacheError, ValkeyClient};
use crate::services::identity::provider::{AuthenticationFailure, IdentityProvider, ProviderError};
use crate::services::identity::record::SessionRecord;

/// Session store backed by a shared cache (Valkey / Redis protocol).
///
/// Sessions live under `"{prefix}:{token}"` as JSON [`SessionRecord`]s.
/// A missing key is an authentication failure; a transport error or an
/// undecodable record is a backend fault and is not downgraded.
#[derive(Clone)]
pub struct CachedSessionProvider<C: CacheClient> {
    cache: Arc<C>,
    // Key namespace shared with the token issuer
    prefix: String,
}

impl CachedSessionProvider<ValkeyClient> {
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self, CacheError> {
        let client = ValkeyClient::new(url).await?;

        Ok(Self {
            cache: Arc::new(client),
            prefix: prefix.into(),
        })
    }
}

impl<C: CacheClient> CachedSessionProvider<C> {
    pub fn new_with_cache(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, token: &Token) -> String {
        format!("{}:{}", self.prefix, token.as_str())
    }
}

#[async_trait]
impl<C: CacheClient> IdentityProvider for CachedSessionProvider<C> {
    fn backend_name(&self) -> &'static str {
        self.cache.backend_name()
    }

    async fn restore_session(
        &self,
        identity: &mut Identity,
        token: &Token,
    ) -> Result<bool, ProviderError> {
        let raw = self
            .cache
            .get_string(&self.key(token))
            .await?
            .ok_or(AuthenticationFailure::UnknownToken)?;

        let record: SessionRecord = serde_json::from_str(&raw)?;
        record.ensure_fresh(Utc::now())?;
        record.apply_to(identity, token);

        Ok(true)
    }

    async fn invalidate_session(&self, token: &Token) -> Result<(), ProviderError> {
        let removed = self.cache.del(&self.key(token)).await?;
        tracing::debug!(
            backend = self.cache.backend_name(),
            token = %token.fingerprint(),
            removed,
            "session key deleted"
        );
        Ok(())
    }
}
