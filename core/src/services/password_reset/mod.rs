//! Password reset token flow

pub mod service;

pub use service::PasswordResetService;
