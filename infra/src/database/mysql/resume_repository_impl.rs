//! MySQL implementation of the ResumeRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cv_core::domain::entities::resume::Resume;
use cv_core::errors::DomainError;
use cv_core::repositories::ResumeRepository;

const RESUME_COLUMNS: &str = "id, account_id, title, file_path, created_at";

/// MySQL-backed resume repository. A unique index on account_id backs
/// the one-resume-per-account rule.
pub struct MySqlResumeRepository {
    pool: MySqlPool,
}

impl MySqlResumeRepository {
    /// Create a new repository over a connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_resume(row: &sqlx::mysql::MySqlRow) -> Result<Resume, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::internal(format!("Failed to get account_id: {}", e)))?;

        Ok(Resume {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            account_id: Uuid::parse_str(&account_id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            title: row
                .try_get("title")
                .map_err(|e| DomainError::internal(format!("Failed to get title: {}", e)))?,
            file_path: row
                .try_get("file_path")
                .map_err(|e| DomainError::internal(format!("Failed to get file_path: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl ResumeRepository for MySqlResumeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resume>, DomainError> {
        let query = format!(
            "SELECT {} FROM resumes WHERE id = ? LIMIT 1",
            RESUME_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        result.map(|row| Self::row_to_resume(&row)).transpose()
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Resume>, DomainError> {
        let query = format!(
            "SELECT {} FROM resumes WHERE account_id = ? LIMIT 1",
            RESUME_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        result.map(|row| Self::row_to_resume(&row)).transpose()
    }

    async fn create(&self, resume: Resume) -> Result<Resume, DomainError> {
        let query = r#"
            INSERT INTO resumes (id, account_id, title, file_path, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(resume.id.to_string())
            .bind(resume.account_id.to_string())
            .bind(&resume.title)
            .bind(&resume.file_path)
            .bind(resume.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return DomainError::conflict("account already has a resume");
                    }
                }
                DomainError::internal(format!("Failed to create resume: {}", e))
            })?;

        Ok(resume)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete resume: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
