use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::{ports::DomainStore, DomainError, DomainRecord, NewDomain};

/// Insertion-ordered record store used by tests and local runs without MongoDB.
pub struct InMemoryDomainStore {
    records: RwLock<Vec<DomainRecord>>,
}

impl InMemoryDomainStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    fn parse_id(id: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(id).map_err(|_| DomainError::validation(format!("Invalid domain id: {id}")))
    }
}

impl Default for InMemoryDomainStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainStore for InMemoryDomainStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<DomainRecord>, DomainError> {
        let id = Self::parse_id(id)?.to_string();
        let store = self
            .records
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(store.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<DomainRecord>, DomainError> {
        let store = self
            .records
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(store.iter().find(|r| r.title == title).cloned())
    }

    async fn find_all(&self) -> Result<Vec<DomainRecord>, DomainError> {
        let store = self
            .records
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(store.clone())
    }

    async fn insert(&self, domain: NewDomain) -> Result<DomainRecord, DomainError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let record = domain.into_record(Uuid::new_v4().to_string());
        store.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &DomainRecord) -> Result<bool, DomainError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        match store.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = record.clone();
                existing.created_at = created_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<DomainRecord>, DomainError> {
        let id = Self::parse_id(id)?.to_string();
        let mut store = self
            .records
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let position = store.iter().position(|r| r.id == id);
        Ok(position.map(|index| store.remove(index)))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
