//! Mock implementation of ProfileRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

use super::repository::ProfileRepository;

/// In-memory profile repository for tests, keyed by account id
pub struct MockProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl MockProfileRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored profiles
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }
}

impl Default for MockProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&account_id).cloned())
    }

    async fn get_or_create(&self, account_id: Uuid) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles
            .entry(account_id)
            .or_insert_with(|| Profile::new(account_id))
            .clone())
    }

    async fn update(&self, profile: Profile) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;

        if !profiles.contains_key(&profile.account_id) {
            return Err(DomainError::not_found("Profile"));
        }

        profiles.insert(profile.account_id, profile.clone());
        Ok(profile)
    }
}
