//! Mock mailer that logs instead of sending.

use async_trait::async_trait;

use cv_core::services::verification::MailerTrait;

/// Log-only mailer for development and tests
#[derive(Clone, Default)]
pub struct MockMailer;

impl MockMailer {
    /// Create a new mock mailer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        tracing::info!(
            to = %email,
            code = %code,
            event = "mock_email",
            "MOCK: verification code email"
        );
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), String> {
        tracing::info!(
            to = %email,
            token = %token,
            event = "mock_email",
            "MOCK: password reset email"
        );
        Ok(())
    }
}
