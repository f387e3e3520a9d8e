//! Composition root for per-request access decisions.
//!
//! `handle` runs the session gate for the matched operation (unless its
//! endpoint is exempt); `authorize` is the separate hook that applies the
//! operation's declared guard once the session question is settled.

use std::sync::Arc;

use axum::http::HeaderMap;

use super::decision::{AccessDecision, DenyReason};
use super::identity::Identity;
use super::registry::{AccessRegistry, OperationKey};
use super::requirement::AccessRequirement;
use super::role_guard::RoleGuard;
use super::session_gate::SessionGate;
use crate::services::identity::{IdentityProvider, ProviderError};

#[derive(Debug, Clone)]
pub struct AccessPolicyDispatcher {
    registry: AccessRegistry,
    gate: SessionGate,
    guard: RoleGuard,
    // Applied to operations nobody declared: session required, no guard.
    fallback: AccessRequirement,
}

impl AccessPolicyDispatcher {
    pub fn new(registry: AccessRegistry, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            registry,
            gate: SessionGate::new(provider),
            guard: RoleGuard,
            fallback: AccessRequirement::authenticated(),
        }
    }

    pub fn registry(&self) -> &AccessRegistry {
        &self.registry
    }

    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        self.gate.provider()
    }

    pub async fn handle(
        &self,
        headers: &HeaderMap,
        operation: Option<&OperationKey>,
        identity: &mut Identity,
    ) -> Result<AccessDecision, ProviderError> {
        let meta = operation.and_then(|key| self.registry.lookup(key));

        if let Some(meta) = meta
            && self.registry.is_exempt(meta.endpoint)
        {
            tracing::trace!(endpoint = %meta.endpoint, "exempt from session gate");
            return Ok(AccessDecision::Proceed);
        }

        let requirement = meta.map_or(&self.fallback, |meta| &meta.requirement);
        self.gate.evaluate(requirement, identity, headers).await
    }

    pub fn authorize(&self, operation: Option<&OperationKey>, identity: &Identity) -> AccessDecision {
        let Some(meta) = operation.and_then(|key| self.registry.lookup(key)) else {
            return AccessDecision::Proceed;
        };

        if self.guard.check(&meta.requirement, identity) {
            AccessDecision::Proceed
        } else {
            AccessDecision::Deny(DenyReason::RoleNotPermitted)
        }
    }
}
