pub mod mock;
pub mod repository;

pub use mock::MockResumeRepository;
pub use repository::ResumeRepository;
