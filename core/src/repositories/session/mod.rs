pub mod mock;
pub mod repository;

pub use mock::MockSessionRepository;
pub use repository::SessionRepository;
