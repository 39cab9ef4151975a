//! Password reset: opaque tokens stored with a TTL in the counter
//! store, delivered by email out of band.

use std::sync::Arc;

use uuid::Uuid;

use cv_shared::config::VerificationConfig;
use cv_shared::utils::validation::{is_valid_password, MIN_PASSWORD_LENGTH};

use crate::domain::entities::session::generate_token;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::auth::service::hash_password;
use crate::services::verification::{CounterStoreTrait, MailerTrait};

/// Service handling the password reset token lifecycle
pub struct PasswordResetService<A, C, M> {
    accounts: Arc<A>,
    store: Arc<C>,
    mailer: Arc<M>,
    config: VerificationConfig,
}

impl<A, C, M> PasswordResetService<A, C, M>
where
    A: AccountRepository,
    C: CounterStoreTrait,
    M: MailerTrait + 'static,
{
    /// Create a new password reset service
    pub fn new(
        accounts: Arc<A>,
        store: Arc<C>,
        mailer: Arc<M>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            accounts,
            store,
            mailer,
            config,
        }
    }

    /// Request a reset for an email address.
    ///
    /// Always succeeds from the caller's point of view so the endpoint
    /// does not reveal which emails have accounts. A token is only
    /// stored and mailed when an active account holds the address.
    pub async fn request(&self, email: &str) -> DomainResult<()> {
        let account = match self.accounts.find_active_by_email(email).await? {
            Some(account) => account,
            None => {
                tracing::debug!(event = "password_reset_unknown_email", "No active account");
                return Ok(());
            }
        };

        let token = generate_token();
        self.store
            .set(
                &Self::token_key(&token),
                &account.id.to_string(),
                self.config.reset_token_ttl_seconds,
            )
            .await
            .map_err(DomainError::internal)?;

        let mailer = Arc::clone(&self.mailer);
        let recipient = account.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_password_reset(&recipient, &token).await {
                tracing::error!(
                    error = %e,
                    event = "password_reset_email_failed",
                    "Password reset delivery failed"
                );
            }
        });

        tracing::info!(
            account_id = %account.id,
            event = "password_reset_requested",
            "Stored password reset token"
        );
        Ok(())
    }

    /// Consume a reset token and set a new password
    pub async fn confirm(&self, token: &str, new_password: &str) -> DomainResult<()> {
        if !is_valid_password(new_password) {
            return Err(DomainError::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let key = Self::token_key(token);
        let account_id = self
            .store
            .get(&key)
            .await
            .map_err(DomainError::internal)?
            .and_then(|v| Uuid::parse_str(&v).ok())
            .ok_or_else(|| DomainError::validation("invalid or expired reset token"))?;

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::validation("invalid or expired reset token"))?;

        account.set_password_hash(hash_password(new_password)?);
        self.accounts.update(account).await?;

        // Single use: drop the token once consumed.
        self.store
            .delete(&key)
            .await
            .map_err(DomainError::internal)?;

        tracing::info!(
            account_id = %account_id,
            event = "password_reset_confirmed",
            "Password updated via reset token"
        );
        Ok(())
    }

    fn token_key(token: &str) -> String {
        format!("pwreset:{}", token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::entities::account::Account;
    use crate::repositories::account::MockAccountRepository;
    use crate::services::verification::tests::mocks::{FakeCounterStore, RecordingMailer};

    struct Harness {
        service: PasswordResetService<MockAccountRepository, FakeCounterStore, RecordingMailer>,
        accounts: Arc<MockAccountRepository>,
        store: Arc<FakeCounterStore>,
        mailer: Arc<RecordingMailer>,
    }

    fn harness() -> Harness {
        let accounts = Arc::new(MockAccountRepository::new());
        let store = Arc::new(FakeCounterStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let service = PasswordResetService::new(
            Arc::clone(&accounts),
            Arc::clone(&store),
            Arc::clone(&mailer),
            VerificationConfig::default(),
        );
        Harness {
            service,
            accounts,
            store,
            mailer,
        }
    }

    async fn active_account(h: &Harness) -> Account {
        let mut account = Account::new(
            "alice".to_string(),
            "a@x.com".to_string(),
            hash_password("pw123456").unwrap(),
        );
        account.activate();
        h.accounts.insert(account.clone()).await;
        account
    }

    #[tokio::test]
    async fn test_unknown_email_succeeds_without_token() {
        let h = harness();
        h.service.request("ghost@x.com").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(h.mailer.sent_resets.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_roundtrip_changes_password() {
        let h = harness();
        let account = active_account(&h).await;

        h.service.request("a@x.com").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let sent = h.mailer.sent_resets.lock().await;
        assert_eq!(sent.len(), 1);
        let token = sent[0].1.clone();
        drop(sent);

        h.service.confirm(&token, "newpass99").await.unwrap();

        let updated = h.accounts.find_by_id(account.id).await.unwrap().unwrap();
        assert_ne!(updated.password_hash, account.password_hash);
        assert!(bcrypt::verify("newpass99", &updated.password_hash).unwrap());

        // Token is single use.
        let err = h.service.confirm(&token, "another99").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let h = harness();
        active_account(&h).await;

        h.service.request("a@x.com").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let token = h.mailer.sent_resets.lock().await[0].1.clone();

        h.store.advance(3601).await;

        let err = h.service.confirm(&token, "newpass99").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_short_password_rejected_before_token_lookup() {
        let h = harness();
        let err = h.service.confirm("whatever", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
