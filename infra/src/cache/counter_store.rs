//! Redis-backed implementation of the core's counter store trait.

use async_trait::async_trait;

use cv_core::services::verification::CounterStoreTrait;
use cv_shared::config::CacheConfig;

use super::redis_client::RedisClient;

/// Counter store backed by Redis.
///
/// Applies the configured key prefix so multiple deployments can share
/// one Redis instance.
#[derive(Clone)]
pub struct RedisCounterStore {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisCounterStore {
    /// Wrap a connected Redis client
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }

    fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }
}

#[async_trait]
impl CounterStoreTrait for RedisCounterStore {
    async fn get_counter(&self, key: &str) -> Result<Option<i64>, String> {
        let value = self
            .client
            .get(&self.key(key))
            .await
            .map_err(|e| e.to_string())?;
        Ok(value.and_then(|v| v.parse().ok()))
    }

    async fn increment(&self, key: &str, expiry_seconds: Option<u64>) -> Result<i64, String> {
        self.client
            .increment(&self.key(key), expiry_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn time_to_live(&self, key: &str) -> Result<Option<i64>, String> {
        self.client
            .ttl(&self.key(key))
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.client
            .delete(&self.key(key))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn set(&self, key: &str, value: &str, expiry_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(&self.key(key), value, expiry_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client
            .get(&self.key(key))
            .await
            .map_err(|e| e.to_string())
    }
}
