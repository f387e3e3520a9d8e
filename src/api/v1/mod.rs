/*
 * Responsibility
 * - v1 public interface (routes + their access declarations)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{PREFIX, access_registry, routes};
