use async_trait::async_trait;
use redis::aio::ConnectionManager;

use crate::services::cache::client::{CacheClient, CacheError, CacheResult};

/// Session store connection (Valkey, or anything speaking the Redis protocol).
///
/// This service never writes sessions: the token issuer does. It reads a
/// record per gated request and deletes one on logout.
#[derive(Clone)]
pub struct ValkeyClient {
    manager: ConnectionManager,
}

impl std::fmt::Debug for ValkeyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValkeyClient").finish_non_exhaustive()
    }
}

impl ValkeyClient {
    /// Connects to `SESSION_STORE_URL` (e.g. `redis://valkey:6379/0`).
    ///
    /// The connection manager reconnects on its own after startup; only the
    /// initial connection failure is reported here.
    pub async fn new(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(connection_error)?;
        let manager = client
            .get_connection_manager()
            .await
            .map_err(connection_error)?;

        Ok(Self { manager })
    }
}

fn connection_error(err: redis::RedisError) -> CacheError {
    CacheError::BackendConnection(err.to_string())
}

fn command_error(err: redis::RedisError) -> CacheError {
    CacheError::BackendCommand(err.to_string())
}

#[async_trait]
impl CacheClient for ValkeyClient {
    fn backend_name(&self) -> &'static str {
        "valkey"
    }

    async fn get_string(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.manager.clone();
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(command_error)
    }

    // 0 when the session was already gone (expired or logged out twice).
    async fn del(&self, key: &str) -> CacheResult<u64> {
        let mut conn = self.manager.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(command_error)
    }
}
