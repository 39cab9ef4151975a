//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository contract for Account entities.
///
/// Implementations must surface a unique-constraint violation on
/// `create`/`update` as `DomainError::Conflict` so callers can tell a
/// duplicate identity apart from other store failures.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique username
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Find the active account holding an email, if any.
    /// At most one can exist; the invariant is maintained by the
    /// registration and activation paths.
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find every *inactive* account matching an (email, username)
    /// pair. The pair is not unique at the data layer, so this may
    /// return more than one row; the validator refuses to proceed in
    /// that case rather than picking one.
    async fn find_inactive_by_email_and_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Vec<Account>, DomainError>;

    /// Persist a new account
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Delete every inactive account holding `email` except `keep_id`.
    /// Used by the activation gate to supersede stale registrations.
    /// Returns the number of rows removed.
    async fn delete_inactive_by_email_except(
        &self,
        email: &str,
        keep_id: Uuid,
    ) -> Result<u64, DomainError>;
}
