//! Domain entities

pub mod account;
pub mod profile;
pub mod resume;
pub mod session;

pub use account::Account;
pub use profile::Profile;
pub use resume::Resume;
pub use session::Session;
