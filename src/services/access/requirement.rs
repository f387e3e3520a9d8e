//! Static access metadata attached to an operation.

/// Authorization check applied after the session gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Caller must hold at least one of the roles. An empty list admits nobody.
    RolesAllowed(Vec<String>),
    /// Caller only needs a logged-in session.
    UserLoggedIn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequirement {
    requires_authentication: bool,
    guard: Option<Guard>,
}

impl AccessRequirement {
    /// Needs a session, no further guard.
    pub fn authenticated() -> Self {
        Self {
            requires_authentication: true,
            guard: None,
        }
    }

    /// Reachable without a session.
    pub fn public() -> Self {
        Self {
            requires_authentication: false,
            guard: None,
        }
    }

    pub fn user_logged_in() -> Self {
        Self {
            requires_authentication: true,
            guard: Some(Guard::UserLoggedIn),
        }
    }

    /// Needs a session holding any of `roles`. Duplicates are dropped, order is kept.
    pub fn roles_allowed<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allowed: Vec<String> = Vec::new();
        for role in roles {
            let role = role.into();
            if !allowed.contains(&role) {
                allowed.push(role);
            }
        }

        Self {
            requires_authentication: true,
            guard: Some(Guard::RolesAllowed(allowed)),
        }
    }

    pub fn requires_authentication(&self) -> bool {
        self.requires_authentication
    }

    pub fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }

    /// Declared roles; empty when the operation has no `RolesAllowed` guard.
    pub fn allowed_roles(&self) -> &[String] {
        match &self.guard {
            Some(Guard::RolesAllowed(roles)) => roles,
            _ => &[],
        }
    }
}

impl Default for AccessRequirement {
    fn default() -> Self {
        Self::authenticated()
    }
}
