//! Redis cache layer: raw client plus the counter store adapter
//! consumed by the core services.

pub mod counter_store;
pub mod redis_client;

pub use counter_store::RedisCounterStore;
pub use redis_client::RedisClient;
