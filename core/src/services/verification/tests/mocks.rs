//! Test doubles for the mail channel and counter store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::services::verification::traits::{CounterStoreTrait, MailerTrait};

/// Mailer double that records every message instead of sending
pub struct RecordingMailer {
    /// (recipient, code) pairs in send order
    pub sent_codes: Arc<Mutex<Vec<(String, String)>>>,
    /// (recipient, token) pairs in send order
    pub sent_resets: Arc<Mutex<Vec<(String, String)>>>,
    /// When true every send fails, for exercising the silent-failure path
    pub fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent_codes: Arc::new(Mutex::new(Vec::new())),
            sent_resets: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl MailerTrait for RecordingMailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        if self.fail {
            return Err("smtp unavailable".to_string());
        }
        self.sent_codes
            .lock()
            .await
            .push((email.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), String> {
        if self.fail {
            return Err("smtp unavailable".to_string());
        }
        self.sent_resets
            .lock()
            .await
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}

#[derive(Clone)]
struct Entry {
    value: String,
    expires_at_secs: Option<i64>,
}

/// In-memory counter store with manually advanced time, so expiry
/// behavior is testable without waiting an hour
pub struct FakeCounterStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    now_secs: Arc<Mutex<i64>>,
}

impl FakeCounterStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            now_secs: Arc::new(Mutex::new(0)),
        }
    }

    /// Advance the fake clock, expiring any keys whose TTL has passed
    pub async fn advance(&self, seconds: i64) {
        let mut now = self.now_secs.lock().await;
        *now += seconds;
        let now = *now;
        self.entries
            .lock()
            .await
            .retain(|_, e| e.expires_at_secs.map_or(true, |at| at > now));
    }

    async fn live_value(&self, key: &str) -> Option<String> {
        let now = *self.now_secs.lock().await;
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|e| e.expires_at_secs.map_or(true, |at| at > now))
            .map(|e| e.value.clone())
    }
}

#[async_trait]
impl CounterStoreTrait for FakeCounterStore {
    async fn get_counter(&self, key: &str) -> Result<Option<i64>, String> {
        Ok(self.live_value(key).await.and_then(|v| v.parse().ok()))
    }

    async fn increment(&self, key: &str, expiry_seconds: Option<u64>) -> Result<i64, String> {
        let now = *self.now_secs.lock().await;
        let mut entries = self.entries.lock().await;

        let live = entries
            .get(key)
            .filter(|e| e.expires_at_secs.map_or(true, |at| at > now))
            .and_then(|e| e.value.parse::<i64>().ok());

        match live {
            Some(current) => {
                let next = current + 1;
                if let Some(entry) = entries.get_mut(key) {
                    entry.value = next.to_string();
                }
                Ok(next)
            }
            None => {
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: "1".to_string(),
                        expires_at_secs: expiry_seconds.map(|s| now + s as i64),
                    },
                );
                Ok(1)
            }
        }
    }

    async fn time_to_live(&self, key: &str) -> Result<Option<i64>, String> {
        let now = *self.now_secs.lock().await;
        let entries = self.entries.lock().await;
        Ok(entries
            .get(key)
            .and_then(|e| e.expires_at_secs)
            .map(|at| at - now)
            .filter(|ttl| *ttl > 0))
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn set(&self, key: &str, value: &str, expiry_seconds: u64) -> Result<(), String> {
        let now = *self.now_secs.lock().await;
        self.entries.lock().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at_secs: Some(now + expiry_seconds as i64),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.live_value(key).await)
    }
}
