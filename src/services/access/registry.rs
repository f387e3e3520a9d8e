//! Operation → access metadata lookup, built once at startup.
//!
//! Operations are keyed by HTTP method and the matched route template
//! (`MatchedPath`), e.g. `GET /api/v1/users/{user_id}`. Each operation belongs
//! to an [`EndpointId`], the stable name of the endpoint group that declares
//! it. Exemption from the session gate is decided per endpoint, by exact
//! equality.

use std::collections::{HashMap, HashSet};
use std::fmt;

use axum::http::Method;

use super::requirement::AccessRequirement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(&'static str);

impl EndpointId {
    pub const SIGN_IN: EndpointId = EndpointId("sign-in");
    pub const LOGOUT: EndpointId = EndpointId("logout");
    pub const ACCOUNT_REGISTRATION: EndpointId = EndpointId("account-registration");
    pub const CHECK_USERNAME: EndpointId = EndpointId("check-username");
    pub const USER_INFO: EndpointId = EndpointId("user-info");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Endpoints that never go through the session gate.
pub const DEFAULT_EXEMPT: [EndpointId; 5] = [
    EndpointId::SIGN_IN,
    EndpointId::LOGOUT,
    EndpointId::ACCOUNT_REGISTRATION,
    EndpointId::CHECK_USERNAME,
    EndpointId::USER_INFO,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationKey {
    method: Method,
    path: String,
}

impl OperationKey {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMeta {
    pub endpoint: EndpointId,
    pub requirement: AccessRequirement,
}

#[derive(Debug, Clone, Default)]
pub struct AccessRegistry {
    operations: HashMap<OperationKey, OperationMeta>,
    exempt: HashSet<EndpointId>,
}

impl AccessRegistry {
    pub fn builder() -> AccessRegistryBuilder {
        AccessRegistryBuilder::new()
    }

    pub fn lookup(&self, key: &OperationKey) -> Option<&OperationMeta> {
        self.operations.get(key)
    }

    pub fn is_exempt(&self, endpoint: EndpointId) -> bool {
        self.exempt.contains(&endpoint)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Collects operation declarations. Starts with [`DEFAULT_EXEMPT`].
#[derive(Debug, Clone)]
pub struct AccessRegistryBuilder {
    operations: HashMap<OperationKey, OperationMeta>,
    exempt: HashSet<EndpointId>,
}

impl AccessRegistryBuilder {
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
            exempt: DEFAULT_EXEMPT.into_iter().collect(),
        }
    }

    pub fn exempt(mut self, endpoint: EndpointId) -> Self {
        self.exempt.insert(endpoint);
        self
    }

    /// Declares an operation. A second declaration for the same method and
    /// path replaces the first.
    pub fn operation(
        mut self,
        method: Method,
        path: impl Into<String>,
        endpoint: EndpointId,
        requirement: AccessRequirement,
    ) -> Self {
        let key = OperationKey::new(method, path);
        let meta = OperationMeta {
            endpoint,
            requirement,
        };
        if let Some(previous) = self.operations.insert(key.clone(), meta) {
            tracing::warn!(
                operation = %key,
                previous_endpoint = %previous.endpoint,
                "operation declared twice; keeping the latest declaration"
            );
        }
        self
    }

    pub fn build(self) -> AccessRegistry {
        AccessRegistry {
            operations: self.operations,
            exempt: self.exempt,
        }
    }
}

impl Default for AccessRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exemptions_cover_the_account_endpoints() {
        let registry = AccessRegistry::builder().build();
        for endpoint in DEFAULT_EXEMPT {
            assert!(registry.is_exempt(endpoint), "{endpoint} should be exempt");
        }
        assert!(!registry.is_exempt(EndpointId::new("reports")));
    }

    #[test]
    fn exemption_is_exact_match_only() {
        let registry = AccessRegistry::builder().build();
        assert!(!registry.is_exempt(EndpointId::new("sign-in-v2")));
        assert!(!registry.is_exempt(EndpointId::new("Sign-In")));
    }

    #[test]
    fn lookup_by_method_and_path() {
        let registry = AccessRegistry::builder()
            .operation(
                Method::GET,
                "/reports",
                EndpointId::new("reports"),
                AccessRequirement::roles_allowed(["auditor"]),
            )
            .build();

        let meta = registry
            .lookup(&OperationKey::new(Method::GET, "/reports"))
            .unwrap();
        assert_eq!(meta.endpoint, EndpointId::new("reports"));
        assert_eq!(meta.requirement.allowed_roles(), ["auditor"]);

        assert!(
            registry
                .lookup(&OperationKey::new(Method::POST, "/reports"))
                .is_none()
        );
    }

    #[test]
    fn later_declaration_replaces_earlier() {
        let registry = AccessRegistry::builder()
            .operation(
                Method::GET,
                "/x",
                EndpointId::new("a"),
                AccessRequirement::authenticated(),
            )
            .operation(
                Method::GET,
                "/x",
                EndpointId::new("b"),
                AccessRequirement::user_logged_in(),
            )
            .build();

        assert_eq!(registry.len(), 1);
        let meta = registry.lookup(&OperationKey::new(Method::GET, "/x")).unwrap();
        assert_eq!(meta.endpoint, EndpointId::new("b"));
    }

    #[test]
    fn custom_exemption() {
        let registry = AccessRegistry::builder()
            .exempt(EndpointId::new("password-reset"))
            .build();
        assert!(registry.is_exempt(EndpointId::new("password-reset")));
        assert!(registry.is_exempt(EndpointId::SIGN_IN));
    }

    #[test]
    fn operation_key_display() {
        let key = OperationKey::new(Method::DELETE, "/users/{user_id}");
        assert_eq!(key.to_string(), "DELETE /users/{user_id}");
    }
}
