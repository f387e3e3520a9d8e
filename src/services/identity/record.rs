use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::access::{Identity, Token};
use crate::services::identity::provider::AuthenticationFailure;

/// Session state as kept by a session store.
///
/// Stored as JSON, e.g.
/// `{"user_id":"6f1c...","roles":["admin"],"expires_at":"2026-01-01T00:00:00Z"}`.
/// `roles` and `expires_at` may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: Uuid,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn new<I, S>(user_id: Uuid, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id,
            roles: roles.into_iter().map(Into::into).collect(),
            expires_at: None,
        }
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn ensure_fresh(&self, now: DateTime<Utc>) -> Result<(), AuthenticationFailure> {
        match self.expires_at {
            Some(at) if at <= now => Err(AuthenticationFailure::Expired(at)),
            _ => Ok(()),
        }
    }

    pub fn apply_to(&self, identity: &mut Identity, token: &Token) {
        identity.establish(token.clone(), self.user_id, self.roles.iter().cloned());
    }
}
