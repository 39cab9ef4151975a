//! Profile entity, the one-to-one companion record of an Account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile record holding the public-facing fields of an account.
/// Exists exactly once per account; created with defaults at
/// registration and idempotently ensured at activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier for the profile
    pub id: Uuid,

    /// Owning account
    pub account_id: Uuid,

    /// Free-form biography
    pub bio: String,

    /// Location string
    pub location: String,

    /// Country name
    pub country: String,

    /// Governorate / region
    pub governorate: String,

    /// Optional path to an uploaded avatar image
    pub avatar_path: Option<String>,

    /// Timestamp when the profile was created
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates an empty profile for an account
    pub fn new(account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            bio: String::new(),
            location: String::new(),
            country: String::new(),
            governorate: String::new(),
            avatar_path: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_defaults() {
        let account_id = Uuid::new_v4();
        let profile = Profile::new(account_id);

        assert_eq!(profile.account_id, account_id);
        assert!(profile.bio.is_empty());
        assert!(profile.avatar_path.is_none());
    }
}
