//! Resume upload, deletion and serving

pub mod service;
pub mod traits;

pub use service::{ResumeService, StoredResume};
pub use traits::FileStorageTrait;
