//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cv_core::domain::entities::account::Account;
use cv_core::errors::DomainError;
use cv_core::repositories::AccountRepository;

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, is_active, \
     verification_code, code_sent_at, created_at, updated_at";

/// MySQL-backed account repository.
///
/// UUIDs are stored as CHAR(36) strings. Unique violations on the
/// username column surface as `DomainError::Conflict`.
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new repository over a connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::internal(format!("Failed to get username: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("Failed to get email: {}", e)))?,
            password_hash: row.try_get("password_hash").map_err(|e| {
                DomainError::internal(format!("Failed to get password_hash: {}", e))
            })?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::internal(format!("Failed to get is_active: {}", e)))?,
            verification_code: row.try_get("verification_code").map_err(|e| {
                DomainError::internal(format!("Failed to get verification_code: {}", e))
            })?,
            code_sent_at: row
                .try_get::<Option<DateTime<Utc>>, _>("code_sent_at")
                .map_err(|e| DomainError::internal(format!("Failed to get code_sent_at: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

fn map_write_error(e: sqlx::Error) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::conflict("username already taken");
        }
    }
    DomainError::internal(format!("Database query failed: {}", e))
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE id = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        result.map(|row| Self::row_to_account(&row)).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE username = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        result.map(|row| Self::row_to_account(&row)).transpose()
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE email = ? AND is_active = TRUE LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        result.map(|row| Self::row_to_account(&row)).transpose()
    }

    async fn find_inactive_by_email_and_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Vec<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts \
             WHERE email = ? AND username = ? AND is_active = FALSE",
            ACCOUNT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(email)
            .bind(username)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        rows.iter().map(Self::row_to_account).collect()
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, username, email, password_hash, is_active,
                verification_code, code_sent_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.is_active)
            .bind(&account.verification_code)
            .bind(account.code_sent_at)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let now = Utc::now();

        let query = r#"
            UPDATE accounts SET
                username = ?,
                email = ?,
                password_hash = ?,
                is_active = ?,
                verification_code = ?,
                code_sent_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.is_active)
            .bind(&account.verification_code)
            .bind(account.code_sent_at)
            .bind(now)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Account"));
        }

        let mut updated = account;
        updated.updated_at = now;
        Ok(updated)
    }

    async fn delete_inactive_by_email_except(
        &self,
        email: &str,
        keep_id: Uuid,
    ) -> Result<u64, DomainError> {
        let query = r#"
            DELETE FROM accounts
            WHERE email = ? AND is_active = FALSE AND id != ?
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(keep_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        Ok(result.rows_affected())
    }
}
