//! Password reset routes

pub mod confirm_reset;
pub mod request_reset;
