//! # CVHub Core
//!
//! Domain layer for the CVHub backend: entities, repository traits,
//! the domain error taxonomy, and the services that implement account
//! registration, email verification with attempt throttling, session
//! authentication, password reset, profile management and resume
//! hosting.
//!
//! All external collaborators (persistent store, redis counter store,
//! mail delivery, file storage) are consumed through narrow traits so
//! they can be swapped for test doubles.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult};
