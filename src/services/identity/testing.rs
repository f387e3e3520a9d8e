//! Scripted identity provider for unit tests.
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::services::access::{Identity, Token};
use crate::services::cache::CacheError;
use crate::services::identity::provider::{AuthenticationFailure, IdentityProvider, ProviderError};

#[derive(Debug, Clone)]
pub(crate) enum Outcome {
    Restore(Vec<&'static str>),
    Decline,
    Reject,
    Fail,
}

/// Answers every `restore_session` with the same outcome and counts calls.
#[derive(Debug)]
pub(crate) struct ScriptedProvider {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    fn backend_name(&self) -> &'static str {
        "scripted"
    }

    async fn restore_session(
        &self,
        identity: &mut Identity,
        token: &Token,
    ) -> Result<bool, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Restore(roles) => {
                identity.establish(token.clone(), Uuid::new_v4(), roles.iter().copied());
                Ok(true)
            }
            Outcome::Decline => Ok(false),
            Outcome::Reject => Err(AuthenticationFailure::UnknownToken.into()),
            Outcome::Fail => Err(CacheError::BackendConnection("connection refused".into()).into()),
        }
    }

    async fn invalidate_session(&self, _token: &Token) -> Result<(), ProviderError> {
        Ok(())
    }
}
