//! SMTP mailer built on lettre.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use cv_core::services::verification::MailerTrait;
use cv_shared::config::EmailConfig;

use crate::InfrastructureError;

/// Mailer that delivers through an SMTP relay with STARTTLS
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Build the transport from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Email(format!("SMTP relay setup failed: {}", e)))?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    async fn send_plain(&self, to: &str, subject: &str, body: String) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| format!("invalid from address: {}", self.from_address))?,
            )
            .to(to.parse().map_err(|_| format!("invalid recipient: {}", to))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| format!("failed to build message: {}", e))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("SMTP send failed: {}", e))?;

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

#[async_trait]
impl MailerTrait for SmtpMailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        let body = format!(
            "Welcome to CVHub!\n\n\
             Your verification code is: {}\n\n\
             The code expires in 10 minutes. If you did not sign up, ignore this message.\n",
            code
        );
        self.send_plain(email, "Verify your CVHub account", body)
            .await
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), String> {
        let body = format!(
            "A password reset was requested for your CVHub account.\n\n\
             Use this token to choose a new password: {}\n\n\
             The token expires in one hour. If you did not request a reset, ignore this message.\n",
            token
        );
        self.send_plain(email, "Reset your CVHub password", body)
            .await
    }
}
