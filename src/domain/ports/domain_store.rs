use async_trait::async_trait;

use crate::domain::{errors::DomainError, DomainRecord, NewDomain};

/// Document store holding one record per domain.
///
/// Ids are opaque strings owned by the implementation; an id the store
/// cannot parse yields `DomainError::Validation`.
#[async_trait]
pub trait DomainStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<DomainRecord>, DomainError>;
    async fn find_by_title(&self, title: &str) -> Result<Option<DomainRecord>, DomainError>;
    /// All records in the store's natural order.
    async fn find_all(&self) -> Result<Vec<DomainRecord>, DomainError>;
    async fn insert(&self, domain: NewDomain) -> Result<DomainRecord, DomainError>;
    /// Overwrites the mutable fields of the record with `record.id`.
    /// Returns `false` when no record matched.
    async fn update(&self, record: &DomainRecord) -> Result<bool, DomainError>;
    async fn delete_by_id(&self, id: &str) -> Result<Option<DomainRecord>, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
