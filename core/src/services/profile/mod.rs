//! Profile viewing and editing

pub mod service;

pub use service::{ProfileChanges, ProfileOverview, ProfileService};
