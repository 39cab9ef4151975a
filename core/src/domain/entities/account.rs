//! Account entity representing a registered (possibly unverified) user.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of an email verification code in ASCII digits
pub const CODE_LENGTH: usize = 8;

/// Account entity. Created inactive at registration and activated once
/// the email verification code is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Unique username
    pub username: String,

    /// Email address; unique among *active* accounts only
    pub email: String,

    /// Bcrypt hash of the credential
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email has been verified
    pub is_active: bool,

    /// Pending verification code, cleared on activation
    #[serde(skip_serializing)]
    pub verification_code: Option<String>,

    /// When the pending code was issued
    pub code_sent_at: Option<DateTime<Utc>>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new inactive account
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            is_active: false,
            verification_code: None,
            code_sent_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches a freshly issued verification code and marks the
    /// account inactive until it is confirmed
    pub fn set_verification_code(&mut self, code: String) {
        self.verification_code = Some(code);
        self.code_sent_at = Some(Utc::now());
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Activates the account and clears pending code state
    pub fn activate(&mut self) {
        self.is_active = true;
        self.verification_code = None;
        self.code_sent_at = None;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored credential hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Whether the pending code was issued longer than
    /// `validity_minutes` ago. An account without a pending code is
    /// never considered expired.
    pub fn is_code_expired(&self, validity_minutes: i64) -> bool {
        match self.code_sent_at {
            Some(sent_at) => Utc::now() > sent_at + Duration::minutes(validity_minutes),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            "alice".to_string(),
            "a@x.com".to_string(),
            "$2b$12$hash".to_string(),
        )
    }

    #[test]
    fn test_new_account_is_inactive() {
        let account = account();
        assert!(!account.is_active);
        assert!(account.verification_code.is_none());
        assert!(account.code_sent_at.is_none());
    }

    #[test]
    fn test_set_verification_code_deactivates() {
        let mut account = account();
        account.is_active = true;

        account.set_verification_code("12345678".to_string());
        assert!(!account.is_active);
        assert_eq!(account.verification_code.as_deref(), Some("12345678"));
        assert!(account.code_sent_at.is_some());
    }

    #[test]
    fn test_activate_clears_code_state() {
        let mut account = account();
        account.set_verification_code("12345678".to_string());

        account.activate();
        assert!(account.is_active);
        assert!(account.verification_code.is_none());
        assert!(account.code_sent_at.is_none());
    }

    #[test]
    fn test_code_expiry() {
        let mut account = account();
        assert!(!account.is_code_expired(10));

        account.set_verification_code("12345678".to_string());
        assert!(!account.is_code_expired(10));

        account.code_sent_at = Some(Utc::now() - Duration::minutes(11));
        assert!(account.is_code_expired(10));
        assert!(!account.is_code_expired(60));
    }
}
