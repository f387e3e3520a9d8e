/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Clone is cheap (everything behind Arc)
 */
use std::sync::Arc;

use crate::services::access::AccessPolicyDispatcher;
use crate::services::identity::IdentityProvider;

#[derive(Clone, Debug)]
pub struct AppState {
    pub access: Arc<AccessPolicyDispatcher>,
}

impl AppState {
    pub fn new(access: Arc<AccessPolicyDispatcher>) -> Self {
        Self { access }
    }

    pub fn identity_provider(&self) -> &Arc<dyn IdentityProvider> {
        self.access.provider()
    }
}
