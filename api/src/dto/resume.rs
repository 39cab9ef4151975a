//! DTOs for resume endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cv_core::domain::entities::resume::Resume;

/// Resume metadata returned by upload and profile endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeInfo {
    pub id: Uuid,
    pub title: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Resume> for ResumeInfo {
    fn from(resume: &Resume) -> Self {
        Self {
            id: resume.id,
            title: resume.title.clone(),
            uploaded_at: resume.created_at,
        }
    }
}
