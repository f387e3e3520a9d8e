//! Declarative authorization checks (`RolesAllowed`, `UserLoggedIn`).

use super::identity::Identity;
use super::requirement::{AccessRequirement, Guard};

#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGuard;

impl RoleGuard {
    /// `RolesAllowed`: logged in and holding at least one declared role.
    /// An empty role list admits nobody.
    pub fn permit(&self, requirement: &AccessRequirement, identity: &Identity) -> bool {
        if !identity.is_logged_in() {
            return false;
        }

        requirement
            .allowed_roles()
            .iter()
            .any(|role| identity.has_role(role))
    }

    /// `UserLoggedIn`: any authenticated caller.
    pub fn user_logged_in(&self, identity: &Identity) -> bool {
        identity.is_logged_in()
    }

    /// Applies whichever guard the operation declares. No guard, no check.
    pub fn check(&self, requirement: &AccessRequirement, identity: &Identity) -> bool {
        match requirement.guard() {
            None => true,
            Some(Guard::UserLoggedIn) => self.user_logged_in(identity),
            Some(Guard::RolesAllowed(_)) => self.permit(requirement, identity),
        }
    }
}
