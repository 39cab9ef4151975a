//! Profile overview, partial update and public views.

use std::sync::Arc;

use cv_shared::utils::validation::{is_valid_email, is_valid_username};

use crate::domain::entities::account::Account;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::resume::Resume;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ProfileRepository, ResumeRepository};

/// Partial update payload; `None` fields are left untouched
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub governorate: Option<String>,
}

/// Everything shown on the authenticated profile page
#[derive(Debug, Clone)]
pub struct ProfileOverview {
    pub account: Account,
    pub profile: Profile,
    pub resume: Option<Resume>,
}

/// Service for profile reads and writes.
///
/// The profile row is created lazily: every read goes through
/// get-or-create so a missing row (e.g. a crash between activation and
/// profile creation) heals on the next access.
pub struct ProfileService<A, P, R> {
    accounts: Arc<A>,
    profiles: Arc<P>,
    resumes: Arc<R>,
}

impl<A, P, R> ProfileService<A, P, R>
where
    A: AccountRepository,
    P: ProfileRepository,
    R: ResumeRepository,
{
    /// Create a new profile service
    pub fn new(accounts: Arc<A>, profiles: Arc<P>, resumes: Arc<R>) -> Self {
        Self {
            accounts,
            profiles,
            resumes,
        }
    }

    /// Fetch the authenticated account's own profile page
    pub async fn overview(&self, account: Account) -> DomainResult<ProfileOverview> {
        let profile = self.profiles.get_or_create(account.id).await?;
        let resume = self.resumes.find_by_account(account.id).await?;
        Ok(ProfileOverview {
            account,
            profile,
            resume,
        })
    }

    /// Apply a partial update to the account and its profile.
    ///
    /// Identity fields (username, email) are re-validated and checked
    /// for collisions with other accounts before anything is written.
    pub async fn update(
        &self,
        account: Account,
        changes: ProfileChanges,
    ) -> DomainResult<ProfileOverview> {
        let mut account = account;
        let mut account_dirty = false;

        if let Some(username) = changes.username {
            if username != account.username {
                if !is_valid_username(&username) {
                    return Err(DomainError::validation("username is missing or malformed"));
                }
                if self.accounts.find_by_username(&username).await?.is_some() {
                    return Err(DomainError::conflict("username already taken"));
                }
                account.username = username;
                account_dirty = true;
            }
        }

        if let Some(email) = changes.email {
            if email != account.email {
                if !is_valid_email(&email) {
                    return Err(DomainError::validation("email is missing or malformed"));
                }
                if self
                    .accounts
                    .find_active_by_email(&email)
                    .await?
                    .is_some()
                {
                    return Err(DomainError::conflict(
                        "an active account with this email already exists",
                    ));
                }
                account.email = email;
                account_dirty = true;
            }
        }

        if account_dirty {
            account = self.accounts.update(account).await?;
        }

        let mut profile = self.profiles.get_or_create(account.id).await?;
        let mut profile_dirty = false;

        if let Some(bio) = changes.bio {
            profile.bio = bio;
            profile_dirty = true;
        }
        if let Some(location) = changes.location {
            profile.location = location;
            profile_dirty = true;
        }
        if let Some(country) = changes.country {
            profile.country = country;
            profile_dirty = true;
        }
        if let Some(governorate) = changes.governorate {
            profile.governorate = governorate;
            profile_dirty = true;
        }

        if profile_dirty {
            profile = self.profiles.update(profile).await?;
        }

        let resume = self.resumes.find_by_account(account.id).await?;

        tracing::info!(
            account_id = %account.id,
            event = "profile_updated",
            "Applied profile changes"
        );
        Ok(ProfileOverview {
            account,
            profile,
            resume,
        })
    }

    /// Public profile page for an active account, by username
    pub async fn public_profile(&self, username: &str) -> DomainResult<ProfileOverview> {
        let account = self
            .accounts
            .find_by_username(username)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(|| DomainError::not_found("User"))?;

        let profile = self.profiles.get_or_create(account.id).await?;
        let resume = self.resumes.find_by_account(account.id).await?;
        Ok(ProfileOverview {
            account,
            profile,
            resume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repositories::account::MockAccountRepository;
    use crate::repositories::profile::MockProfileRepository;
    use crate::repositories::resume::MockResumeRepository;
    use crate::services::auth::service::hash_password;

    struct Harness {
        service: ProfileService<MockAccountRepository, MockProfileRepository, MockResumeRepository>,
        accounts: Arc<MockAccountRepository>,
    }

    fn harness() -> Harness {
        let accounts = Arc::new(MockAccountRepository::new());
        let profiles = Arc::new(MockProfileRepository::new());
        let resumes = Arc::new(MockResumeRepository::new());
        let service = ProfileService::new(Arc::clone(&accounts), profiles, resumes);
        Harness { service, accounts }
    }

    async fn account(h: &Harness, username: &str, email: &str, active: bool) -> Account {
        let mut account = Account::new(
            username.to_string(),
            email.to_string(),
            hash_password("pw123456").unwrap(),
        );
        if active {
            account.activate();
        }
        h.accounts.insert(account.clone()).await;
        account
    }

    #[tokio::test]
    async fn test_overview_heals_missing_profile() {
        let h = harness();
        let acc = account(&h, "alice", "a@x.com", true).await;

        let overview = h.service.overview(acc.clone()).await.unwrap();
        assert_eq!(overview.profile.account_id, acc.id);
        assert!(overview.resume.is_none());
    }

    #[tokio::test]
    async fn test_update_bio_and_location() {
        let h = harness();
        let acc = account(&h, "alice", "a@x.com", true).await;

        let overview = h
            .service
            .update(
                acc,
                ProfileChanges {
                    bio: Some("systems engineer".to_string()),
                    location: Some("Cairo".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(overview.profile.bio, "systems engineer");
        assert_eq!(overview.profile.location, "Cairo");
        assert_eq!(overview.account.username, "alice");
    }

    #[tokio::test]
    async fn test_update_username_checks_collision() {
        let h = harness();
        account(&h, "bob", "b@x.com", true).await;
        let acc = account(&h, "alice", "a@x.com", true).await;

        let err = h
            .service
            .update(
                acc,
                ProfileChanges {
                    username: Some("bob".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_email_rejects_active_holder() {
        let h = harness();
        account(&h, "bob", "b@x.com", true).await;
        let acc = account(&h, "alice", "a@x.com", true).await;

        let err = h
            .service
            .update(
                acc,
                ProfileChanges {
                    email: Some("b@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_same_username_is_noop_not_conflict() {
        let h = harness();
        let acc = account(&h, "alice", "a@x.com", true).await;

        let overview = h
            .service
            .update(
                acc,
                ProfileChanges {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(overview.account.username, "alice");
    }

    #[tokio::test]
    async fn test_public_profile_hides_inactive_accounts() {
        let h = harness();
        account(&h, "alice", "a@x.com", false).await;

        let err = h.service.public_profile("alice").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_public_profile_for_active_account() {
        let h = harness();
        let acc = account(&h, "alice", "a@x.com", true).await;

        let overview = h.service.public_profile("alice").await.unwrap();
        assert_eq!(overview.account.id, acc.id);
    }
}
