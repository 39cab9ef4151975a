//! Profile repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

/// Repository contract for Profile entities
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile belonging to an account
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError>;

    /// Return the account's profile, creating an empty one if absent.
    /// Must be idempotent: a pre-existing profile is returned untouched.
    async fn get_or_create(&self, account_id: Uuid) -> Result<Profile, DomainError>;

    /// Update an existing profile
    async fn update(&self, profile: Profile) -> Result<Profile, DomainError>;
}
