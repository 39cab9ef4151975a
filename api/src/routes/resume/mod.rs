//! Resume routes: upload, delete, inline view and download

pub mod delete;
pub mod download;
pub mod upload;
pub mod view;
