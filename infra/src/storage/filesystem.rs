//! Filesystem implementation of the core's file storage trait.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use cv_core::services::resume::FileStorageTrait;
use cv_shared::config::UploadConfig;

/// Stores files under a configured root directory.
///
/// `save` overwrites in place, matching the one-file-per-account
/// naming the resume service uses. Relative names containing parent
/// components are rejected so a stored path can never escape the root.
pub struct FilesystemStorage {
    root: PathBuf,
}

impl FilesystemStorage {
    /// Create storage rooted at the configured upload directory
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: PathBuf::from(&config.resume_dir),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, String> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(format!("invalid storage path: {}", path));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorageTrait for FilesystemStorage {
    async fn save(&self, path: &str, bytes: &[u8]) -> Result<(), String> {
        let full = self.resolve(path)?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| format!("failed to create upload directory: {}", e))?;

        fs::write(&full, bytes)
            .await
            .map_err(|e| format!("failed to write {}: {}", full.display(), e))?;

        tracing::debug!(path = %full.display(), size = bytes.len(), "Wrote file");
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, String> {
        let full = self.resolve(path)?;
        fs::read(&full)
            .await
            .map_err(|e| format!("failed to read {}: {}", full.display(), e))
    }

    async fn remove(&self, path: &str) -> Result<(), String> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("failed to remove {}: {}", full.display(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_in_tempdir() -> (tempfile::TempDir, FilesystemStorage) {
        let dir = tempfile::tempdir().unwrap();
        let config = UploadConfig {
            resume_dir: dir.path().to_string_lossy().into_owned(),
            ..UploadConfig::default()
        };
        (dir, FilesystemStorage::new(&config))
    }

    #[tokio::test]
    async fn test_save_read_remove_roundtrip() {
        let (_dir, storage) = storage_in_tempdir();

        storage.save("a.pdf", b"%PDF-1.7 data").await.unwrap();
        assert_eq!(storage.read("a.pdf").await.unwrap(), b"%PDF-1.7 data");

        storage.remove("a.pdf").await.unwrap();
        assert!(storage.read("a.pdf").await.is_err());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let (_dir, storage) = storage_in_tempdir();

        storage.save("a.pdf", b"first").await.unwrap();
        storage.save("a.pdf", b"second").await.unwrap();
        assert_eq!(storage.read("a.pdf").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_noop() {
        let (_dir, storage) = storage_in_tempdir();
        storage.remove("absent.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn test_parent_components_rejected() {
        let (_dir, storage) = storage_in_tempdir();
        assert!(storage.save("../escape.pdf", b"x").await.is_err());
        assert!(storage.read("../../etc/passwd").await.is_err());
    }
}
