use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Flat file storage for uploaded mapper files and images.
///
/// `save` returns the path recorded on the domain; the other methods take
/// such a path back.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, name: &str, bytes: &[u8]) -> Result<String, DomainError>;
    async fn read(&self, path: &str) -> Result<Vec<u8>, DomainError>;
    async fn exists(&self, path: &str) -> Result<bool, DomainError>;
    async fn remove(&self, path: &str) -> Result<(), DomainError>;
}
