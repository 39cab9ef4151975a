//! Domain error taxonomy.
//!
//! Every failure the services can produce is expressed here; the API
//! layer maps each variant onto an HTTP status and a stable error code.
//! Nothing in the core retries on error.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing or malformed input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Duplicate identity detected by a pre-check (active email or
    /// username already taken)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Attempt cap reached for a (email, username) pair
    #[error("Too many failed attempts. Try again in {retry_after_seconds} seconds.")]
    Throttled { retry_after_seconds: i64 },

    /// More than one account matched where at most one may; the
    /// validator refuses to guess
    #[error("Multiple users found.")]
    AmbiguousMatch,

    /// No matching record
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Submitted verification code does not match the pending one
    #[error("Invalid verification code.")]
    InvalidCode,

    /// Username/password pair did not authenticate
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or invalid session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Unexpected failure in a collaborator (store, mailer, hashing)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Shorthand for a not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
