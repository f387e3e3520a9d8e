pub mod cached;
pub mod factory;
pub mod memory;
pub mod provider;
pub mod record;
#[cfg(test)]
pub(crate) mod testing;

pub use cached::CachedSessionProvider;
pub use factory::build_identity_provider;
pub use memory::MemorySessionProvider;
pub use provider::{AuthenticationFailure, IdentityProvider, ProviderError};
pub use record::SessionRecord;
