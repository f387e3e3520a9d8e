//! Factory: build the identity provider from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::identity::{
    CachedSessionProvider, IdentityProvider, MemorySessionProvider,
};

pub async fn build_identity_provider(config: &Config) -> Result<Arc<dyn IdentityProvider>, AppError> {
    if let Some(url) = &config.session_store_url {
        let provider = CachedSessionProvider::connect(url, config.session_key_prefix.clone())
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to connect to session store");
                AppError::Internal
            })?;

        tracing::info!(prefix = %config.session_key_prefix, "using cached session store");
        return Ok(Arc::new(provider));
    }

    if config.dev_sessions.is_empty() {
        tracing::warn!("no session store configured and no DEV_SESSIONS; every token will be rejected");
    } else {
        tracing::info!(
            sessions = config.dev_sessions.len(),
            "using in-memory session store"
        );
    }

    Ok(Arc::new(MemorySessionProvider::with_sessions(
        config.dev_sessions.iter().cloned(),
    )))
}
