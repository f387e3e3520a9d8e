/*
 * Responsibility
 * - middleware public interface
 * - auth::access (session gate + guards), cors, http (request id / trace / limits)
 */
pub mod auth;
pub mod cors;
pub mod http;
