//! Repository traits for persistence, with in-memory mocks for tests.

pub mod account;
pub mod profile;
pub mod resume;
pub mod session;

pub use account::AccountRepository;
pub use profile::ProfileRepository;
pub use resume::ResumeRepository;
pub use session::SessionRepository;
