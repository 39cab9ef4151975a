//! Resume repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::resume::Resume;
use crate::errors::DomainError;

/// Repository contract for Resume entities.
///
/// The store carries a unique constraint on the owning account; a
/// violation must surface as `DomainError::Conflict` (the one-resume
/// rule is also pre-checked in the service).
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Find a resume by its identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resume>, DomainError>;

    /// Find the resume owned by an account, if any
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Resume>, DomainError>;

    /// Persist a new resume
    async fn create(&self, resume: Resume) -> Result<Resume, DomainError>;

    /// Delete a resume. Returns false when it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
