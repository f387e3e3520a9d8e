use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::services::access::{Identity, Token};
use crate::services::identity::provider::{AuthenticationFailure, IdentityProvider, ProviderError};
use crate::services::identity::record::SessionRecord;

/// Process-local session table. Development and tests only: sessions vanish
/// on restart and are not shared between instances.
#[derive(Debug, Default)]
pub struct MemorySessionProvider {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions<I>(sessions: I) -> Self
    where
        I: IntoIterator<Item = (Token, SessionRecord)>,
    {
        let sessions = sessions
            .into_iter()
            .map(|(token, record)| (token.as_str().to_string(), record))
            .collect();
        Self {
            sessions: RwLock::new(sessions),
        }
    }

    pub async fn insert(&self, token: Token, record: SessionRecord) {
        self.sessions
            .write()
            .await
            .insert(token.as_str().to_string(), record);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl IdentityProvider for MemorySessionProvider {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn restore_session(
        &self,
        identity: &mut Identity,
        token: &Token,
    ) -> Result<bool, ProviderError> {
        let sessions = self.sessions.read().await;
        let record = sessions
            .get(token.as_str())
            .ok_or(AuthenticationFailure::UnknownToken)?;

        record.ensure_fresh(Utc::now())?;
        record.apply_to(identity, token);
        Ok(true)
    }

    async fn invalidate_session(&self, token: &Token) -> Result<(), ProviderError> {
        self.sessions.write().await.remove(token.as_str());
        Ok(())
    }
}
