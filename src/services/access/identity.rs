/*
 * Responsibility
 * - Request-scoped view of the caller: logged in or not, subject, roles
 * - Only an identity provider flips it to logged in (via `establish`)
 * - Stored in request extensions once the access middleware lets a request through
 */
use std::collections::HashSet;

use uuid::Uuid;

use super::token::Token;

#[derive(Debug, Clone, Default)]
pub struct Identity {
    logged_in: bool,
    user_id: Option<Uuid>,
    roles: HashSet<String>,
    session_token: Option<Token>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.logged_in && self.roles.contains(name)
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn session_token(&self) -> Option<&Token> {
        self.session_token.as_ref()
    }

    /// Roles in a stable (sorted) order, for responses and logs.
    pub fn roles_sorted(&self) -> Vec<String> {
        let mut roles: Vec<String> = self.roles.iter().cloned().collect();
        roles.sort();
        roles
    }

    /// Marks the identity as authenticated for the session behind `token`.
    ///
    /// Intended for identity providers only, after they verified the token.
    pub fn establish<I, S>(&mut self, token: Token, user_id: Uuid, roles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.logged_in = true;
        self.user_id = Some(user_id);
        self.roles = roles.into_iter().map(Into::into).collect();
        self.session_token = Some(token);
    }

    pub fn clear(&mut self) {
        *self = Self::anonymous();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_roles() {
        let identity = Identity::anonymous();
        assert!(!identity.is_logged_in());
        assert!(!identity.has_role("admin"));
        assert_eq!(identity.user_id(), None);
        assert!(identity.session_token().is_none());
    }

    #[test]
    fn establish_then_clear() {
        let user_id = Uuid::new_v4();
        let mut identity = Identity::anonymous();
        identity.establish(Token::new("t"), user_id, ["user", "admin"]);

        assert!(identity.is_logged_in());
        assert!(identity.has_role("admin"));
        assert!(!identity.has_role("auditor"));
        assert_eq!(identity.user_id(), Some(user_id));
        assert_eq!(identity.roles_sorted(), vec!["admin", "user"]);

        identity.clear();
        assert!(!identity.is_logged_in());
        assert!(!identity.has_role("admin"));
    }
}
