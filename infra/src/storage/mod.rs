//! Filesystem storage for uploaded resume files.

pub mod filesystem;

pub use filesystem::FilesystemStorage;
