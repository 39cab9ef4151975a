//! Resume entity. Each account may host at most one resume file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A hosted resume document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    /// Unique identifier for the resume
    pub id: Uuid,

    /// Owning account; unique, one resume per account
    pub account_id: Uuid,

    /// Display title
    pub title: String,

    /// Relative path of the stored file
    pub file_path: String,

    /// Timestamp when the resume was uploaded
    pub created_at: DateTime<Utc>,
}

impl Resume {
    /// Creates a new resume record
    pub fn new(account_id: Uuid, title: String, file_path: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            title,
            file_path,
            created_at: Utc::now(),
        }
    }
}
