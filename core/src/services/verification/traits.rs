//! Traits for mail delivery and counter store integration

use async_trait::async_trait;

/// Trait for the asynchronous mail delivery channel.
///
/// Implementations enqueue or send the message; the verification core
/// never blocks on delivery and never observes a return value on the
/// request path.
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Send a verification code to an email address
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String>;

    /// Send a password reset token to an email address
    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), String>;
}

/// Trait for the ephemeral key-value store backing the failure counter.
///
/// Operations are individually atomic but not composed transactionally;
/// the check-then-increment race this allows is benign (one extra
/// attempt at worst).
#[async_trait]
pub trait CounterStoreTrait: Send + Sync {
    /// Read a counter value
    async fn get_counter(&self, key: &str) -> Result<Option<i64>, String>;

    /// Atomically increment a counter, creating it with `expiry_seconds`
    /// when absent. Returns the new value.
    async fn increment(&self, key: &str, expiry_seconds: Option<u64>) -> Result<i64, String>;

    /// Remaining time-to-live of a key in seconds, None when the key
    /// does not exist or has no expiry
    async fn time_to_live(&self, key: &str) -> Result<Option<i64>, String>;

    /// Delete a key; deleting an absent key is a no-op
    async fn delete(&self, key: &str) -> Result<(), String>;

    /// Store a string value with an expiry
    async fn set(&self, key: &str, value: &str, expiry_seconds: u64) -> Result<(), String>;

    /// Read a string value
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
}
