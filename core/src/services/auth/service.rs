//! Registration and login service.

use std::sync::Arc;

use cv_shared::utils::validation::{
    is_valid_email, is_valid_password, is_valid_username, MIN_PASSWORD_LENGTH,
};

use crate::domain::entities::account::Account;
use crate::domain::entities::session::Session;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ProfileRepository, SessionRepository};
use crate::services::verification::{CounterStoreTrait, MailerTrait, VerificationService};

/// Service handling sign-up, login and logout.
///
/// Registration delegates code issuance to the verification service;
/// duplicate identities are pre-checked here so the store's own
/// conflict error only fires on a race, which is surfaced as an
/// internal error.
pub struct AuthService<M, C, A, P, S> {
    accounts: Arc<A>,
    sessions: Arc<S>,
    profiles: Arc<P>,
    verification: Arc<VerificationService<M, C, A, P>>,
}

impl<M, C, A, P, S> AuthService<M, C, A, P, S>
where
    M: MailerTrait + 'static,
    C: CounterStoreTrait,
    A: AccountRepository,
    P: ProfileRepository,
    S: SessionRepository,
{
    /// Create a new auth service
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<S>,
        profiles: Arc<P>,
        verification: Arc<VerificationService<M, C, A, P>>,
    ) -> Self {
        Self {
            accounts,
            sessions,
            profiles,
            verification,
        }
    }

    /// Register a new account (or re-register a pending one).
    ///
    /// Creates an inactive account with a hashed credential, ensures
    /// its profile exists, and issues a verification code. When an
    /// inactive account already holds the same (email, username) pair
    /// the credential is overwritten and a fresh code issued instead
    /// of creating a second row.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Account> {
        if !is_valid_username(username) {
            return Err(DomainError::validation("username is missing or malformed"));
        }
        if !is_valid_email(email) {
            return Err(DomainError::validation("email is missing or malformed"));
        }
        if !is_valid_password(password) {
            return Err(DomainError::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if self.accounts.find_active_by_email(email).await?.is_some() {
            return Err(DomainError::conflict(
                "an active account with this email already exists",
            ));
        }

        let password_hash = hash_password(password)?;

        let account = match self.accounts.find_by_username(username).await? {
            Some(existing) if existing.is_active => {
                return Err(DomainError::conflict("username already taken"));
            }
            Some(existing) if existing.email == email => {
                // Re-registration against a pending account: overwrite
                // the credential, a fresh code goes out below.
                let mut account = existing;
                account.set_password_hash(password_hash);
                self.accounts.update(account).await?
            }
            Some(_) => {
                return Err(DomainError::conflict("username already taken"));
            }
            None => {
                let account = Account::new(
                    username.to_string(),
                    email.to_string(),
                    password_hash,
                );
                // A conflict here escaped the pre-checks (concurrent
                // registration); report it as unexpected.
                match self.accounts.create(account).await {
                    Ok(account) => account,
                    Err(DomainError::Conflict { message }) => {
                        return Err(DomainError::internal(format!(
                            "unexpected persistence conflict: {}",
                            message
                        )));
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        self.profiles.get_or_create(account.id).await?;

        let account = self.verification.issue(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "account_registered",
            "Registered inactive account and issued verification code"
        );
        Ok(account)
    }

    /// Authenticate a username/password pair against an active account
    /// and issue a session token
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<Session> {
        let account = self
            .accounts
            .find_by_username(username)
            .await?
            .filter(|a| a.is_active)
            .ok_or(DomainError::InvalidCredentials)?;

        let matches = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| DomainError::internal(format!("credential check failed: {}", e)))?;
        if !matches {
            return Err(DomainError::InvalidCredentials);
        }

        let session = self.sessions.create(Session::issue(account.id)).await?;

        tracing::info!(
            account_id = %account.id,
            event = "login",
            "Issued session token"
        );
        Ok(session)
    }

    /// Invalidate a session token. Succeeds even when the token was
    /// already gone.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.sessions.delete_by_token(token).await?;
        Ok(())
    }

    /// Resolve a session token to its account, for the auth extractor
    pub async fn authenticate(&self, token: &str) -> DomainResult<Account> {
        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        self.accounts
            .find_by_id(session.account_id)
            .await?
            .filter(|a| a.is_active)
            .ok_or(DomainError::Unauthorized)
    }
}

/// Hash a password with bcrypt at the default cost
pub fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_shared::config::VerificationConfig;

    use crate::repositories::account::MockAccountRepository;
    use crate::repositories::profile::MockProfileRepository;
    use crate::repositories::session::MockSessionRepository;
    use crate::services::verification::tests::mocks::{FakeCounterStore, RecordingMailer};

    type Service = AuthService<
        RecordingMailer,
        FakeCounterStore,
        MockAccountRepository,
        MockProfileRepository,
        MockSessionRepository,
    >;

    struct Harness {
        service: Service,
        accounts: Arc<MockAccountRepository>,
        profiles: Arc<MockProfileRepository>,
    }

    fn harness() -> Harness {
        let accounts = Arc::new(MockAccountRepository::new());
        let profiles = Arc::new(MockProfileRepository::new());
        let verification = Arc::new(VerificationService::new(
            Arc::new(RecordingMailer::new()),
            Arc::new(FakeCounterStore::new()),
            Arc::clone(&accounts),
            Arc::clone(&profiles),
            VerificationConfig::default(),
        ));
        let service = AuthService::new(
            Arc::clone(&accounts),
            Arc::new(MockSessionRepository::new()),
            Arc::clone(&profiles),
            verification,
        );
        Harness {
            service,
            accounts,
            profiles,
        }
    }

    #[tokio::test]
    async fn test_register_creates_inactive_account_with_code() {
        let h = harness();
        let account = h
            .service
            .register("alice", "a@x.com", "pw123456")
            .await
            .unwrap();

        assert!(!account.is_active);
        let code = account.verification_code.unwrap();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(h.accounts.len().await, 1);
        assert_eq!(h.profiles.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let h = harness();
        let err = h
            .service
            .register("alice", "a@x.com", "pw1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(h.accounts.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_rejects_active_email() {
        let h = harness();
        let mut holder = Account::new(
            "bob".to_string(),
            "a@x.com".to_string(),
            hash_password("pw123456").unwrap(),
        );
        holder.activate();
        h.accounts.insert(holder).await;

        let err = h
            .service
            .register("alice", "a@x.com", "pw123456")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_reregistration_overwrites_pending_account() {
        let h = harness();
        let first = h
            .service
            .register("alice", "a@x.com", "pw123456")
            .await
            .unwrap();

        let second = h
            .service
            .register("alice", "a@x.com", "newpass99")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_ne!(first.password_hash, second.password_hash);
        assert_eq!(h.accounts.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username_other_email() {
        let h = harness();
        h.service
            .register("alice", "a@x.com", "pw123456")
            .await
            .unwrap();

        let err = h
            .service
            .register("alice", "other@x.com", "pw123456")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_login_requires_active_account() {
        let h = harness();
        h.service
            .register("alice", "a@x.com", "pw123456")
            .await
            .unwrap();

        let err = h.service.login("alice", "pw123456").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_logout_roundtrip() {
        let h = harness();
        let account = h
            .service
            .register("alice", "a@x.com", "pw123456")
            .await
            .unwrap();

        let mut account = account;
        account.activate();
        h.accounts.update(account).await.unwrap();

        let session = h.service.login("alice", "pw123456").await.unwrap();
        assert_eq!(session.token.len(), 40);

        let authed = h.service.authenticate(&session.token).await.unwrap();
        assert_eq!(authed.username, "alice");

        h.service.logout(&session.token).await.unwrap();
        let err = h.service.authenticate(&session.token).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let h = harness();
        let mut account = h
            .service
            .register("alice", "a@x.com", "pw123456")
            .await
            .unwrap();
        account.activate();
        h.accounts.update(account).await.unwrap();

        let err = h.service.login("alice", "wrongpass").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }
}
