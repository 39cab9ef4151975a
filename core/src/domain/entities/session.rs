//! Session entity: an opaque login token bound to an account.

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a session token in hex characters
pub const TOKEN_LENGTH: usize = 40;

/// An issued login session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token presented in the Authorization header
    pub token: String,

    /// Account the session belongs to
    pub account_id: Uuid,

    /// Timestamp when the session was issued
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Issues a new session with a random token for an account
    pub fn issue(account_id: Uuid) -> Self {
        Self {
            token: generate_token(),
            account_id,
            created_at: Utc::now(),
        }
    }
}

/// Generate a random 40-hex-character session token from the OS CSPRNG
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LENGTH / 2];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
