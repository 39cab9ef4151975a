//! Session repository trait.

use async_trait::async_trait;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

/// Repository contract for login sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Resolve a token back to its session
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError>;

    /// Delete a session by token. Returns false when it did not exist.
    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError>;
}
