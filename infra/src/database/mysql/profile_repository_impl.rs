//! MySQL implementation of the ProfileRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cv_core::domain::entities::profile::Profile;
use cv_core::errors::DomainError;
use cv_core::repositories::ProfileRepository;

const PROFILE_COLUMNS: &str =
    "id, account_id, bio, location, country, governorate, avatar_path, created_at";

/// MySQL-backed profile repository.
///
/// One row per account, enforced by a unique index on account_id; the
/// get-or-create path treats a lost insert race as success and
/// re-reads the winner's row.
pub struct MySqlProfileRepository {
    pool: MySqlPool,
}

impl MySqlProfileRepository {
    /// Create a new repository over a connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_profile(row: &sqlx::mysql::MySqlRow) -> Result<Profile, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::internal(format!("Failed to get account_id: {}", e)))?;

        Ok(Profile {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            account_id: Uuid::parse_str(&account_id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            bio: row
                .try_get("bio")
                .map_err(|e| DomainError::internal(format!("Failed to get bio: {}", e)))?,
            location: row
                .try_get("location")
                .map_err(|e| DomainError::internal(format!("Failed to get location: {}", e)))?,
            country: row
                .try_get("country")
                .map_err(|e| DomainError::internal(format!("Failed to get country: {}", e)))?,
            governorate: row
                .try_get("governorate")
                .map_err(|e| DomainError::internal(format!("Failed to get governorate: {}", e)))?,
            avatar_path: row
                .try_get("avatar_path")
                .map_err(|e| DomainError::internal(format!("Failed to get avatar_path: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
        })
    }

    async fn insert(&self, profile: &Profile) -> Result<(), sqlx::Error> {
        let query = r#"
            INSERT INTO profiles (
                id, account_id, bio, location, country, governorate,
                avatar_path, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(profile.id.to_string())
            .bind(profile.account_id.to_string())
            .bind(&profile.bio)
            .bind(&profile.location)
            .bind(&profile.country)
            .bind(&profile.governorate)
            .bind(&profile.avatar_path)
            .bind(profile.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MySqlProfileRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let query = format!(
            "SELECT {} FROM profiles WHERE account_id = ? LIMIT 1",
            PROFILE_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        result.map(|row| Self::row_to_profile(&row)).transpose()
    }

    async fn get_or_create(&self, account_id: Uuid) -> Result<Profile, DomainError> {
        if let Some(profile) = self.find_by_account(account_id).await? {
            return Ok(profile);
        }

        let profile = Profile::new(account_id);
        match self.insert(&profile).await {
            Ok(()) => Ok(profile),
            Err(e) => {
                // Lost a create race; the winner's row is the profile.
                let is_duplicate = e
                    .as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false);
                if is_duplicate {
                    self.find_by_account(account_id)
                        .await?
                        .ok_or_else(|| DomainError::internal("profile vanished after insert race"))
                } else {
                    Err(DomainError::internal(format!(
                        "Failed to create profile: {}",
                        e
                    )))
                }
            }
        }
    }

    async fn update(&self, profile: Profile) -> Result<Profile, DomainError> {
        let query = r#"
            UPDATE profiles SET
                bio = ?,
                location = ?,
                country = ?,
                governorate = ?,
                avatar_path = ?
            WHERE account_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&profile.bio)
            .bind(&profile.location)
            .bind(&profile.country)
            .bind(&profile.governorate)
            .bind(&profile.avatar_path)
            .bind(profile.account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to update profile: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Profile"));
        }

        Ok(profile)
    }
}
