/*
 * Responsibility
 * - Session status response bodies (camelCase on the wire)
 * - `LoginStatus` is also the body of every not-logged-in denial
 */
use serde::Serialize;
use uuid::Uuid;

use crate::services::access::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    pub logged_in: bool,
}

impl LoginStatus {
    pub fn logged_out() -> Self {
        Self { logged_in: false }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl From<&Identity> for UserInfoResponse {
    fn from(identity: &Identity) -> Self {
        if !identity.is_logged_in() {
            return Self {
                logged_in: false,
                user_id: None,
                roles: Vec::new(),
            };
        }

        Self {
            logged_in: true,
            user_id: identity.user_id(),
            roles: identity.roles_sorted(),
        }
    }
}
