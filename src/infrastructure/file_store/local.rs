use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{ports::FileStore, DomainError};

/// Stores uploads as flat files under a single directory.
///
/// Recorded paths are `root.join(name)`, so a relative root yields paths
/// relative to the working directory (`uploads/Acme_mapper.xlsx`).
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Creates the upload directory if it does not exist yet.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| DomainError::storage(format!("{}: {e}", root.display())))?;

        tracing::info!(root = %root.display(), "file store ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn io_error(path: &str, e: io::Error) -> DomainError {
    if e.kind() == io::ErrorKind::NotFound {
        DomainError::file_missing(format!("File not found: {path}"))
    } else {
        DomainError::storage(format!("{path}: {e}"))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, name: &str, bytes: &[u8]) -> Result<String, DomainError> {
        if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
            return Err(DomainError::validation(format!("Invalid file name: {name}")));
        }

        let path = self.root.join(name);
        let recorded = path.to_string_lossy().into_owned();
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| io_error(&recorded, e))?;

        tracing::debug!(path = %recorded, size = bytes.len(), "file written");
        Ok(recorded)
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, DomainError> {
        tokio::fs::read(path).await.map_err(|e| io_error(path, e))
    }

    async fn exists(&self, path: &str) -> Result<bool, DomainError> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn remove(&self, path: &str) -> Result<(), DomainError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| io_error(path, e))?;

        tracing::debug!(path, "file removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("uploads");

        let store = LocalFileStore::new(&root).await.unwrap();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn test_save_read_remove() {
        let temp = TempDir::new().unwrap();
        let store = LocalFileStore::new(temp.path()).await.unwrap();

        let path = store.save("Acme_map.xlsx", b"sheet").await.unwrap();
        assert!(path.ends_with("Acme_map.xlsx"));
        assert!(store.exists(&path).await.unwrap());
        assert_eq!(store.read(&path).await.unwrap(), b"sheet");

        store.remove(&path).await.unwrap();
        assert!(!store.exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_maps_to_file_missing() {
        let temp = TempDir::new().unwrap();
        let store = LocalFileStore::new(temp.path()).await.unwrap();
        let path = temp.path().join("gone.png").to_string_lossy().into_owned();

        assert!(matches!(
            store.read(&path).await,
            Err(DomainError::FileMissing(_))
        ));
        assert!(matches!(
            store.remove(&path).await,
            Err(DomainError::FileMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_exists_reports_io_errors() {
        let temp = TempDir::new().unwrap();
        let store = LocalFileStore::new(temp.path()).await.unwrap();
        let plain = store.save("plain.png", b"x").await.unwrap();
        let below_file = format!("{plain}/child.png");

        assert!(matches!(
            store.exists(&below_file).await,
            Err(DomainError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_save_rejects_nested_names() {
        let temp = TempDir::new().unwrap();
        let store = LocalFileStore::new(temp.path()).await.unwrap();

        assert!(matches!(
            store.save("../escape.png", b"x").await,
            Err(DomainError::Validation(_))
        ));
    }
}
