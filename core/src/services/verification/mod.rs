//! Email verification: code issuance, attempt throttling and account
//! activation.
//!
//! This is the stateful heart of the backend. Failed attempts per
//! (email, username) pair are counted in an external key-value store
//! with a one-hour sliding expiry; reaching the cap blocks further
//! checks until the key expires, at which point a fresh code has been
//! issued and the counter implicitly resets.

pub mod service;
pub mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use service::VerificationService;
pub use traits::{CounterStoreTrait, MailerTrait};
