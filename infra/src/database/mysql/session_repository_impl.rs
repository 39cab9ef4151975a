//! MySQL implementation of the SessionRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cv_core::domain::entities::session::Session;
use cv_core::errors::DomainError;
use cv_core::repositories::SessionRepository;

/// MySQL-backed session store keyed by the opaque token
pub struct MySqlSessionRepository {
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    /// Create a new repository over a connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<Session, DomainError> {
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::internal(format!("Failed to get account_id: {}", e)))?;

        Ok(Session {
            token: row
                .try_get("token")
                .map_err(|e| DomainError::internal(format!("Failed to get token: {}", e)))?,
            account_id: Uuid::parse_str(&account_id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let query = r#"
            INSERT INTO sessions (token, account_id, created_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&session.token)
            .bind(session.account_id.to_string())
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to create session: {}", e)))?;

        Ok(session)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let query = r#"
            SELECT token, account_id, created_at
            FROM sessions
            WHERE token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        result.map(|row| Self::row_to_session(&row)).transpose()
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete session: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
