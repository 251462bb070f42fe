use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use crate::domain::{ports::DomainStore, DomainError, DomainRecord, NewDomain};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    url: String,
    description: String,
    file_name: String,
    mapper_file_url: String,
    image_path: String,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
}

impl From<NewDomain> for DomainDocument {
    fn from(domain: NewDomain) -> Self {
        let now = to_bson_time(domain.created_at);
        Self {
            id: None,
            title: domain.title,
            url: domain.url,
            description: domain.description,
            file_name: domain.file_name,
            mapper_file_url: domain.mapper_file_url,
            image_path: domain.image_path,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<DomainDocument> for DomainRecord {
    fn from(document: DomainDocument) -> Self {
        Self {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: document.title,
            url: document.url,
            description: document.description,
            file_name: document.file_name,
            mapper_file_url: document.mapper_file_url,
            image_path: document.image_path,
            created_at: from_bson_time(document.created_at),
            updated_at: from_bson_time(document.updated_at),
        }
    }
}

fn to_bson_time(time: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(time.timestamp_millis())
}

fn from_bson_time(time: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(time.timestamp_millis()).unwrap_or_default()
}

pub struct MongoDomainStore {
    database: Database,
    collection: Collection<DomainDocument>,
}

impl MongoDomainStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, DomainError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(Self::new(&client, database, collection))
    }

    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        let database = client.database(database);
        Self {
            collection: database.collection(collection),
            database,
        }
    }

    fn parse_id(id: &str) -> Result<ObjectId, DomainError> {
        ObjectId::parse_str(id)
            .map_err(|_| DomainError::validation(format!("Invalid domain id: {id}")))
    }
}

#[async_trait]
impl DomainStore for MongoDomainStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<DomainRecord>, DomainError> {
        let oid = Self::parse_id(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(document.map(Into::into))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<DomainRecord>, DomainError> {
        let document = self
            .collection
            .find_one(doc! { "title": title }, None)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(document.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<DomainRecord>, DomainError> {
        let cursor = self
            .collection
            .find(None, None)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let documents: Vec<DomainDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, domain: NewDomain) -> Result<DomainRecord, DomainError> {
        let mut document = DomainDocument::from(domain);
        let result = self
            .collection
            .insert_one(&document, None)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DomainError::storage("Inserted domain has no ObjectId"))?;
        document.id = Some(oid);

        Ok(document.into())
    }

    async fn update(&self, record: &DomainRecord) -> Result<bool, DomainError> {
        let oid = Self::parse_id(&record.id)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": oid },
                doc! {
                    "$set": {
                        "title": record.title.as_str(),
                        "url": record.url.as_str(),
                        "description": record.description.as_str(),
                        "fileName": record.file_name.as_str(),
                        "mapperFileUrl": record.mapper_file_url.as_str(),
                        "imagePath": record.image_path.as_str(),
                        "updatedAt": to_bson_time(record.updated_at),
                    }
                },
                None,
            )
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<DomainRecord>, DomainError> {
        let oid = Self::parse_id(id)?;
        let document = self
            .collection
            .find_one_and_delete(doc! { "_id": oid }, None)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(document.map(Into::into))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        Ok(())
    }
}
