//! Redis-backed key-value storage.
//!
//! Collections are stored as plain string values with no expiry; the
//! engine always writes a whole collection at once.
//!
//! # Example
//!
//! ```ignore
//! use bandhan_common::redis_store::RedisStore;
//!
//! let store = RedisStore::connect("redis://127.0.0.1:6379").await?;
//! store.set_item("bandhan:disputes", "[]").await?;
//! ```

use crate::storage::KeyValueStore;
use crate::{AppError, AppResult};
use fred::clients::Client as RedisClient;
use fred::interfaces::{ClientLike, KeysInterface};
use std::sync::Arc;
use tracing::{debug, info};

/// Key-value store using Redis.
#[derive(Clone)]
pub struct RedisStore {
    redis: Arc<RedisClient>,
}

impl RedisStore {
    /// Wrap an already connected client.
    #[must_use]
    pub const fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    /// Connect to Redis at `url` and wait for the connection.
    pub async fn connect(url: &str) -> AppResult<Self> {
        let config = fred::types::config::Config::from_url(url)
            .map_err(|e| AppError::Config(format!("Invalid Redis URL: {e}")))?;
        let client = RedisClient::new(config, None, None, None);
        client.connect();
        client
            .wait_for_connect()
            .await
            .map_err(|e| AppError::Redis(e.to_string()))?;

        info!("Connected to Redis storage");
        Ok(Self::new(Arc::new(client)))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let result: Option<String> = self
            .redis
            .get(key)
            .await
            .map_err(|e| AppError::Redis(e.to_string()))?;

        debug!(key = %key, hit = result.is_some(), "Redis read");
        Ok(result)
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.redis
            .set::<(), _, _>(key, value, None, None, false)
            .await
            .map_err(|e| AppError::Redis(e.to_string()))?;

        debug!(key = %key, bytes = value.len(), "Redis write");
        Ok(())
    }
}
