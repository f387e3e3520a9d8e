/*
 * Responsibility
 * - access: per-request access policy (token, session gate, guards)
 * - identity: identity providers (session restore / invalidation)
 * - cache: session store client
 */
pub mod access;
pub mod cache;
pub mod identity;
