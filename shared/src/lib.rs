//! Shared types, configuration and validation helpers for the CVHub backend.
//!
//! This crate holds everything that is needed by more than one layer:
//! configuration structs loaded from the environment, wire-level response
//! types, and input validation utilities.

pub mod config;
pub mod types;
pub mod utils;
