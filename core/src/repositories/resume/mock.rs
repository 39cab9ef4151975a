//! Mock implementation of ResumeRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::resume::Resume;
use crate::errors::DomainError;

use super::repository::ResumeRepository;

/// In-memory resume repository for tests
pub struct MockResumeRepository {
    resumes: Arc<RwLock<HashMap<Uuid, Resume>>>,
}

impl MockResumeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            resumes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockResumeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResumeRepository for MockResumeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resume>, DomainError> {
        let resumes = self.resumes.read().await;
        Ok(resumes.get(&id).cloned())
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Resume>, DomainError> {
        let resumes = self.resumes.read().await;
        Ok(resumes
            .values()
            .find(|r| r.account_id == account_id)
            .cloned())
    }

    async fn create(&self, resume: Resume) -> Result<Resume, DomainError> {
        let mut resumes = self.resumes.write().await;

        if resumes.values().any(|r| r.account_id == resume.account_id) {
            return Err(DomainError::conflict("account already has a resume"));
        }

        resumes.insert(resume.id, resume.clone());
        Ok(resume)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut resumes = self.resumes.write().await;
        Ok(resumes.remove(&id).is_some())
    }
}
