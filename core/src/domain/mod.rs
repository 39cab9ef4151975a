//! Domain model for the CVHub backend

pub mod entities;
