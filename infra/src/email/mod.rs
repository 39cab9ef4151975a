//! Email delivery backends.
//!
//! `create_mailer` picks the backend from configuration: "smtp" for
//! real delivery via lettre, anything else falls back to the logging
//! mock, which is also what tests and local development use.

pub mod mock;
pub mod smtp;

use async_trait::async_trait;

use cv_core::services::verification::MailerTrait;
use cv_shared::config::EmailConfig;

use crate::InfrastructureError;

pub use mock::MockMailer;
pub use smtp::SmtpMailer;

/// The configured mail backend
pub enum Mailer {
    /// Real SMTP delivery
    Smtp(SmtpMailer),
    /// Log-only delivery for development and tests
    Mock(MockMailer),
}

#[async_trait]
impl MailerTrait for Mailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        match self {
            Mailer::Smtp(m) => m.send_verification_code(email, code).await,
            Mailer::Mock(m) => m.send_verification_code(email, code).await,
        }
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), String> {
        match self {
            Mailer::Smtp(m) => m.send_password_reset(email, token).await,
            Mailer::Mock(m) => m.send_password_reset(email, token).await,
        }
    }
}

/// Build a mailer from configuration
pub fn create_mailer(config: &EmailConfig) -> Result<Mailer, InfrastructureError> {
    match config.provider.as_str() {
        "smtp" => {
            tracing::info!(host = %config.smtp_host, "Using SMTP mailer");
            Ok(Mailer::Smtp(SmtpMailer::new(config)?))
        }
        other => {
            if other != "mock" {
                tracing::warn!(provider = %other, "Unknown email provider, using mock mailer");
            } else {
                tracing::info!("Using mock mailer");
            }
            Ok(Mailer::Mock(MockMailer::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mailer_defaults_to_mock() {
        let config = EmailConfig::default();
        let mailer = create_mailer(&config).unwrap();
        assert!(matches!(mailer, Mailer::Mock(_)));
    }

    #[test]
    fn test_create_mailer_unknown_provider_falls_back() {
        let config = EmailConfig {
            provider: "pigeon".to_string(),
            ..EmailConfig::default()
        };
        let mailer = create_mailer(&config).unwrap();
        assert!(matches!(mailer, Mailer::Mock(_)));
    }
}
