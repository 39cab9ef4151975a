//! MySQL repository implementations

pub mod account_repository_impl;
pub mod profile_repository_impl;
pub mod resume_repository_impl;
pub mod session_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use profile_repository_impl::MySqlProfileRepository;
pub use resume_repository_impl::MySqlResumeRepository;
pub use session_repository_impl::MySqlSessionRepository;
