//! Resume lifecycle: one PDF per account, overwritten in place.

use std::sync::Arc;

use uuid::Uuid;

use cv_shared::config::UploadConfig;

use crate::domain::entities::account::Account;
use crate::domain::entities::resume::Resume;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ResumeRepository};
use crate::services::resume::traits::FileStorageTrait;

const PDF_MAGIC: &[u8] = b"%PDF";

/// A resume together with its file bytes, for view/download responses
#[derive(Debug, Clone)]
pub struct StoredResume {
    pub resume: Resume,
    pub bytes: Vec<u8>,
}

/// Service handling resume upload, deletion and retrieval
pub struct ResumeService<A, R, F> {
    accounts: Arc<A>,
    resumes: Arc<R>,
    storage: Arc<F>,
    config: UploadConfig,
}

impl<A, R, F> ResumeService<A, R, F>
where
    A: AccountRepository,
    R: ResumeRepository,
    F: FileStorageTrait,
{
    /// Create a new resume service
    pub fn new(accounts: Arc<A>, resumes: Arc<R>, storage: Arc<F>, config: UploadConfig) -> Self {
        Self {
            accounts,
            resumes,
            storage,
            config,
        }
    }

    /// Store an uploaded resume for the account.
    ///
    /// Rejects anything that is not a PDF, files over the configured
    /// size cap, and a second resume when one already exists. The file
    /// lands at a per-account path, so a re-upload after delete reuses
    /// the same name and overwrites any leftover file.
    pub async fn upload(
        &self,
        account: &Account,
        title: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<Resume> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        if !filename.to_ascii_lowercase().ends_with(".pdf") || !bytes.starts_with(PDF_MAGIC) {
            return Err(DomainError::validation("only PDF files are accepted"));
        }
        if bytes.len() > self.config.max_resume_bytes {
            return Err(DomainError::validation(format!(
                "file exceeds the {} byte limit",
                self.config.max_resume_bytes
            )));
        }
        if self.resumes.find_by_account(account.id).await?.is_some() {
            return Err(DomainError::validation("You can only upload one resume."));
        }

        let path = Self::file_path_for(account.id);
        self.storage
            .save(&path, &bytes)
            .await
            .map_err(DomainError::internal)?;

        let resume = self
            .resumes
            .create(Resume::new(account.id, title.trim().to_string(), path))
            .await?;

        tracing::info!(
            account_id = %account.id,
            resume_id = %resume.id,
            size = bytes.len(),
            event = "resume_uploaded",
            "Stored resume file"
        );
        Ok(resume)
    }

    /// Delete a resume the account owns. Unknown ids and other
    /// accounts' resumes both come back as not found.
    pub async fn delete(&self, account: &Account, resume_id: Uuid) -> DomainResult<()> {
        let resume = self
            .resumes
            .find_by_id(resume_id)
            .await?
            .filter(|r| r.account_id == account.id)
            .ok_or_else(|| DomainError::not_found("Resume"))?;

        self.resumes.delete(resume.id).await?;

        // The row is gone; a stranded file only wastes disk and gets
        // overwritten on the next upload.
        if let Err(e) = self.storage.remove(&resume.file_path).await {
            tracing::warn!(
                resume_id = %resume.id,
                error = %e,
                event = "resume_file_remove_failed",
                "Resume row deleted but file removal failed"
            );
        }

        tracing::info!(
            account_id = %account.id,
            resume_id = %resume.id,
            event = "resume_deleted",
            "Deleted resume"
        );
        Ok(())
    }

    /// Fetch an active user's resume with its bytes, for inline view
    /// or download
    pub async fn fetch_for(&self, username: &str) -> DomainResult<StoredResume> {
        let account = self
            .accounts
            .find_by_username(username)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(|| DomainError::not_found("User"))?;

        let resume = self
            .resumes
            .find_by_account(account.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Resume"))?;

        let bytes = self
            .storage
            .read(&resume.file_path)
            .await
            .map_err(|e| {
                tracing::error!(
                    resume_id = %resume.id,
                    error = %e,
                    event = "resume_file_read_failed",
                    "Resume row exists but file is unreadable"
                );
                DomainError::not_found("Resume")
            })?;

        Ok(StoredResume { resume, bytes })
    }

    fn file_path_for(account_id: Uuid) -> String {
        format!("{}.pdf", account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::repositories::account::MockAccountRepository;
    use crate::repositories::resume::MockResumeRepository;
    use crate::services::auth::service::hash_password;

    /// In-memory blob store
    struct MemoryStorage {
        files: RwLock<HashMap<String, Vec<u8>>>,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self {
                files: RwLock::new(HashMap::new()),
            }
        }

        async fn contains(&self, path: &str) -> bool {
            self.files.read().await.contains_key(path)
        }
    }

    #[async_trait]
    impl FileStorageTrait for MemoryStorage {
        async fn save(&self, path: &str, bytes: &[u8]) -> Result<(), String> {
            self.files
                .write()
                .await
                .insert(path.to_string(), bytes.to_vec());
            Ok(())
        }

        async fn read(&self, path: &str) -> Result<Vec<u8>, String> {
            self.files
                .read()
                .await
                .get(path)
                .cloned()
                .ok_or_else(|| format!("no such file: {}", path))
        }

        async fn remove(&self, path: &str) -> Result<(), String> {
            self.files.write().await.remove(path);
            Ok(())
        }
    }

    struct Harness {
        service: ResumeService<MockAccountRepository, MockResumeRepository, MemoryStorage>,
        accounts: Arc<MockAccountRepository>,
        storage: Arc<MemoryStorage>,
    }

    fn harness() -> Harness {
        let accounts = Arc::new(MockAccountRepository::new());
        let resumes = Arc::new(MockResumeRepository::new());
        let storage = Arc::new(MemoryStorage::new());
        let service = ResumeService::new(
            Arc::clone(&accounts),
            resumes,
            Arc::clone(&storage),
            UploadConfig::default(),
        );
        Harness {
            service,
            accounts,
            storage,
        }
    }

    async fn active_account(h: &Harness, username: &str) -> Account {
        let mut account = Account::new(
            username.to_string(),
            format!("{}@x.com", username),
            hash_password("pw123456").unwrap(),
        );
        account.activate();
        h.accounts.insert(account.clone()).await;
        account
    }

    fn pdf_bytes() -> Vec<u8> {
        b"%PDF-1.7 test document".to_vec()
    }

    #[tokio::test]
    async fn test_upload_and_fetch() {
        let h = harness();
        let acc = active_account(&h, "alice").await;

        let resume = h
            .service
            .upload(&acc, "My CV", "cv.pdf", pdf_bytes())
            .await
            .unwrap();
        assert_eq!(resume.title, "My CV");
        assert!(h.storage.contains(&resume.file_path).await);

        let stored = h.service.fetch_for("alice").await.unwrap();
        assert_eq!(stored.bytes, pdf_bytes());
        assert_eq!(stored.resume.id, resume.id);
    }

    #[tokio::test]
    async fn test_second_upload_rejected() {
        let h = harness();
        let acc = active_account(&h, "alice").await;

        h.service
            .upload(&acc, "My CV", "cv.pdf", pdf_bytes())
            .await
            .unwrap();
        let err = h
            .service
            .upload(&acc, "Another", "cv2.pdf", pdf_bytes())
            .await
            .unwrap_err();
        assert!(
            matches!(err, DomainError::Validation { ref message } if message == "You can only upload one resume.")
        );
    }

    #[tokio::test]
    async fn test_non_pdf_rejected() {
        let h = harness();
        let acc = active_account(&h, "alice").await;

        let err = h
            .service
            .upload(&acc, "CV", "cv.docx", pdf_bytes())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        let err = h
            .service
            .upload(&acc, "CV", "cv.pdf", b"not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_oversize_rejected() {
        let h = harness();
        let acc = active_account(&h, "alice").await;

        let mut bytes = pdf_bytes();
        bytes.resize(UploadConfig::default().max_resume_bytes + 1, 0);
        let err = h
            .service
            .upload(&acc, "CV", "cv.pdf", bytes)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_owner_only() {
        let h = harness();
        let alice = active_account(&h, "alice").await;
        let bob = active_account(&h, "bob").await;

        let resume = h
            .service
            .upload(&alice, "CV", "cv.pdf", pdf_bytes())
            .await
            .unwrap();

        let err = h.service.delete(&bob, resume.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        h.service.delete(&alice, resume.id).await.unwrap();
        assert!(!h.storage.contains(&resume.file_path).await);

        let err = h.service.fetch_for("alice").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_hidden_for_inactive_user() {
        let h = harness();
        let mut acc = Account::new(
            "carol".to_string(),
            "carol@x.com".to_string(),
            hash_password("pw123456").unwrap(),
        );
        acc.is_active = false;
        h.accounts.insert(acc).await;

        let err = h.service.fetch_for("carol").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_reupload_after_delete_reuses_path() {
        let h = harness();
        let acc = active_account(&h, "alice").await;

        let first = h
            .service
            .upload(&acc, "CV", "cv.pdf", pdf_bytes())
            .await
            .unwrap();
        h.service.delete(&acc, first.id).await.unwrap();

        let second = h
            .service
            .upload(&acc, "CV v2", "cv.pdf", pdf_bytes())
            .await
            .unwrap();
        assert_eq!(first.file_path, second.file_path);
    }
}
