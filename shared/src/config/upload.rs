//! Resume upload configuration

use serde::{Deserialize, Serialize};

/// Limits and storage location for uploaded resume files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Directory uploaded resumes are written to
    pub resume_dir: String,

    /// Maximum accepted resume size in bytes
    pub max_resume_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            resume_dir: String::from("media/resumes"),
            max_resume_bytes: 5 * 1024 * 1024,
        }
    }
}

impl UploadConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            resume_dir: std::env::var("RESUME_UPLOAD_DIR")
                .unwrap_or(defaults.resume_dir),
            max_resume_bytes: std::env::var("RESUME_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_resume_bytes),
        }
    }
}
