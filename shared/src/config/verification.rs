//! Email verification and throttling configuration

use serde::{Deserialize, Serialize};

/// Settings for the verification code lifecycle and attempt throttling
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a verification code stays valid after issuance
    pub code_validity_minutes: i64,

    /// Failed attempts allowed per (email, username) pair before throttling
    pub max_failed_attempts: i64,

    /// Sliding expiry window for the failure counter, in seconds
    pub throttle_window_seconds: u64,

    /// TTL for password reset tokens, in seconds
    pub reset_token_ttl_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_validity_minutes: 10,
            max_failed_attempts: 3,
            throttle_window_seconds: 3600,
            reset_token_ttl_seconds: 3600,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_validity_minutes: std::env::var("VERIFICATION_CODE_VALIDITY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_validity_minutes),
            max_failed_attempts: std::env::var("VERIFICATION_MAX_FAILED_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_failed_attempts),
            throttle_window_seconds: std::env::var("VERIFICATION_THROTTLE_WINDOW_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.throttle_window_seconds),
            reset_token_ttl_seconds: std::env::var("PASSWORD_RESET_TOKEN_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reset_token_ttl_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_throttle_window() {
        let config = VerificationConfig::default();
        assert_eq!(config.max_failed_attempts, 3);
        assert_eq!(config.throttle_window_seconds, 3600);
        assert_eq!(config.code_validity_minutes, 10);
    }
}
