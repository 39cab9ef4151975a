//! Registration and session authentication

pub mod service;

pub use service::AuthService;
