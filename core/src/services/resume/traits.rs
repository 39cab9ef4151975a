use async_trait::async_trait;

/// Blob storage for uploaded resume files.
///
/// Paths are relative names owned by the service; the implementation
/// decides where they land. `save` overwrites an existing file at the
/// same path.
#[async_trait]
pub trait FileStorageTrait: Send + Sync {
    /// Write (or overwrite) a file
    async fn save(&self, path: &str, bytes: &[u8]) -> Result<(), String>;

    /// Read a file back in full
    async fn read(&self, path: &str) -> Result<Vec<u8>, String>;

    /// Remove a file. Removing a missing file is not an error.
    async fn remove(&self, path: &str) -> Result<(), String>;
}
