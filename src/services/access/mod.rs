/*
 * Responsibility
 * - Access policy core: token resolution, session gate, role guard, dispatcher
 * - No HTTP response shaping here (see middleware::auth and error)
 */
pub mod decision;
pub mod dispatcher;
pub mod identity;
pub mod registry;
pub mod requirement;
pub mod role_guard;
pub mod session_gate;
pub mod token;

pub use decision::{AccessDecision, DenyReason};
pub use dispatcher::AccessPolicyDispatcher;
pub use identity::Identity;
pub use registry::{AccessRegistry, EndpointId, OperationKey, OperationMeta};
pub use requirement::{AccessRequirement, Guard};
pub use role_guard::RoleGuard;
pub use session_gate::SessionGate;
pub use token::{AUTH_TOKEN, CookieMap, Token, TokenResolver};
