use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    file_stem, image_storage_name, mapper_storage_name,
    ports::{DomainStore, FileStore},
    DomainError, DomainRecord, FileRole, NewDomain, StoredFile, UploadPolicy, UploadedFile,
};

/// Fields and files of a create request, as decoded by the HTTP layer.
#[derive(Debug, Default)]
pub struct CreateDomain {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub mapper_file: Option<UploadedFile>,
    pub image_file: Option<UploadedFile>,
}

/// Partial update: anything left `None` (or blank) keeps its stored value.
#[derive(Debug, Default)]
pub struct UpdateDomain {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub mapper_file: Option<UploadedFile>,
    pub image_file: Option<UploadedFile>,
}

/// Keeps domain documents and their uploaded files in step.
///
/// File and document writes are sequential and best-effort: a failure part
/// way through leaves whatever was already written in place.
pub struct DomainManager {
    store: Arc<dyn DomainStore>,
    files: Arc<dyn FileStore>,
    policy: UploadPolicy,
}

fn provided(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(field: &str, value: Option<String>) -> Result<String, DomainError> {
    provided(value).ok_or_else(|| DomainError::validation(format!("{field} is required")))
}

impl DomainManager {
    pub fn new(store: Arc<dyn DomainStore>, files: Arc<dyn FileStore>) -> Self {
        Self::with_policy(store, files, UploadPolicy::default())
    }

    pub fn with_policy(
        store: Arc<dyn DomainStore>,
        files: Arc<dyn FileStore>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            store,
            files,
            policy,
        }
    }

    #[instrument(skip(self, request), fields(title = ?request.title))]
    pub async fn create(&self, request: CreateDomain) -> Result<DomainRecord, DomainError> {
        let title = required("title", request.title)?;
        let url = required("url", request.url)?;
        let description = required("description", request.description)?;

        let (mapper, image) = match (request.mapper_file, request.image_file) {
            (Some(mapper), Some(image)) => (mapper, image),
            _ => {
                return Err(DomainError::validation(
                    "Both mapper file and image are required",
                ))
            }
        };
        self.policy.check(FileRole::Mapper, &mapper)?;
        self.policy.check(FileRole::Image, &image)?;

        if self.store.find_by_title(&title).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Domain with title '{title}' already exists"
            )));
        }

        let mapper_path = self
            .files
            .save(&mapper_storage_name(&title, &mapper), &mapper.bytes)
            .await?;
        let image_path = self
            .files
            .save(&image_storage_name(&image), &image.bytes)
            .await?;

        let record = self
            .store
            .insert(NewDomain::new(title, url, description, mapper_path, image_path))
            .await?;

        tracing::info!(id = %record.id, title = %record.title, "domain created");
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<DomainRecord, DomainError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DomainError::validation("Domain id is required"));
        }

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Domain not found: {id}")))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<DomainRecord>, DomainError> {
        self.store.find_all().await
    }

    #[instrument(skip(self, request), fields(id = ?request.id))]
    pub async fn update(&self, request: UpdateDomain) -> Result<DomainRecord, DomainError> {
        let id = provided(request.id)
            .ok_or_else(|| DomainError::validation("Domain id is required"))?;
        let existing = self.get(&id).await?;
        let mut updated = existing.clone();

        if let Some(title) = provided(request.title) {
            if title != existing.title {
                if let Some(other) = self.store.find_by_title(&title).await? {
                    if other.id != existing.id {
                        return Err(DomainError::conflict(format!(
                            "Domain with title '{title}' already exists"
                        )));
                    }
                }
            }
            updated.title = title;
        }
        if let Some(url) = provided(request.url) {
            updated.url = url;
        }
        if let Some(description) = provided(request.description) {
            updated.description = description;
        }

        if let Some(mapper) = &request.mapper_file {
            self.policy.check(FileRole::Mapper, mapper)?;
        }
        if let Some(image) = &request.image_file {
            self.policy.check(FileRole::Image, image)?;
        }

        let mut superseded = Vec::new();

        if let Some(mapper) = request.mapper_file {
            let path = self
                .files
                .save(&mapper_storage_name(&updated.title, &mapper), &mapper.bytes)
                .await?;
            let stem = file_stem(&path);

            if stem == existing.file_name {
                tracing::debug!(path = %existing.mapper_file_url, "mapper name unchanged, keeping stored path");
            } else {
                superseded.push(existing.mapper_file_url.clone());
                updated.mapper_file_url = path;
                updated.file_name = stem;
            }
        }

        if let Some(image) = request.image_file {
            let path = self
                .files
                .save(&image_storage_name(&image), &image.bytes)
                .await?;

            if file_stem(&path) == existing.image_stem() {
                tracing::debug!(path = %existing.image_path, "image name unchanged, keeping stored path");
            } else {
                superseded.push(existing.image_path.clone());
                updated.image_path = path;
            }
        }

        for path in &superseded {
            if let Err(e) = self.files.remove(path).await {
                tracing::warn!(path = %path, error = %e, "failed to remove replaced file");
                return Err(e);
            }
        }

        updated.updated_at = Utc::now();
        if !self.store.update(&updated).await? {
            return Err(DomainError::not_found(format!("Domain not found: {id}")));
        }

        tracing::info!(id = %updated.id, replaced = superseded.len(), "domain updated");
        Ok(updated)
    }

    /// Removes both files, then the document. The document is kept when
    /// either file could not be removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<DomainRecord, DomainError> {
        let record = self.get(id).await?;

        let mut failures = Vec::new();
        for path in [&record.mapper_file_url, &record.image_path] {
            if let Err(e) = self.files.remove(path).await {
                tracing::warn!(path = %path, error = %e, "failed to remove domain file");
                failures.push(e);
            }
        }

        if !failures.is_empty() {
            let all_missing = failures
                .iter()
                .all(|e| matches!(e, DomainError::FileMissing(_)));
            let detail = failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            let message = format!("Failed to delete domain files: {detail}");

            return Err(if all_missing {
                DomainError::file_missing(message)
            } else {
                DomainError::storage(message)
            });
        }

        self.store.delete_by_id(&record.id).await?.ok_or_else(|| {
            DomainError::storage(format!(
                "Files for domain {} were removed but the document could not be deleted",
                record.id
            ))
        })?;

        tracing::info!(id = %record.id, title = %record.title, "domain deleted");
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn mapper_file(&self, id: &str) -> Result<StoredFile, DomainError> {
        let record = self.get(id).await?;
        self.load(&record.mapper_file_url).await
    }

    #[instrument(skip(self))]
    pub async fn image_file(&self, id: &str) -> Result<StoredFile, DomainError> {
        let record = self.get(id).await?;
        self.load(&record.image_path).await
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        self.store.ping().await
    }

    async fn load(&self, path: &str) -> Result<StoredFile, DomainError> {
        if !self.files.exists(path).await? {
            return Err(DomainError::file_missing(format!("File not found: {path}")));
        }

        let bytes = self.files.read(path).await?;
        let file_name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());

        Ok(StoredFile { file_name, bytes })
    }
}
