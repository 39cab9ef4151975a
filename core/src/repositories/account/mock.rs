//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::repository::AccountRepository;

/// In-memory account repository for tests
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with an account, bypassing uniqueness checks
    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Whether the repository is empty
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.is_active && a.email == email)
            .cloned())
    }

    async fn find_inactive_by_email_and_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        let mut matches: Vec<Account> = accounts
            .values()
            .filter(|a| !a.is_active && a.email == email && a.username == username)
            .cloned()
            .collect();
        // Deterministic order for tests
        matches.sort_by_key(|a| a.created_at);
        Ok(matches)
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.username == account.username) {
            return Err(DomainError::conflict("username already taken"));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::not_found("Account"));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete_inactive_by_email_except(
        &self,
        email: &str,
        keep_id: Uuid,
    ) -> Result<u64, DomainError> {
        let mut accounts = self.accounts.write().await;
        let stale: Vec<Uuid> = accounts
            .values()
            .filter(|a| !a.is_active && a.email == email && a.id != keep_id)
            .map(|a| a.id)
            .collect();
        let removed = stale.len() as u64;
        for id in stale {
            accounts.remove(&id);
        }
        Ok(removed)
    }
}
