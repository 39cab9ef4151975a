//! Profile routes

pub mod overview;
pub mod public_view;
pub mod update;
