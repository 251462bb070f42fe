use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A registered domain: metadata plus the mapper file and image kept on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub file_name: String,
    pub mapper_file_url: String,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainRecord {
    /// Base name of the stored image, used to detect same-name re-uploads.
    pub fn image_stem(&self) -> String {
        file_stem(&self.image_path)
    }
}

/// A domain that has not been persisted yet; the record store assigns the id.
#[derive(Debug, Clone)]
pub struct NewDomain {
    pub title: String,
    pub url: String,
    pub description: String,
    pub file_name: String,
    pub mapper_file_url: String,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
}

impl NewDomain {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        mapper_file_url: impl Into<String>,
        image_path: impl Into<String>,
    ) -> Self {
        let mapper_file_url = mapper_file_url.into();
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            file_name: file_stem(&mapper_file_url),
            mapper_file_url,
            image_path: image_path.into(),
            created_at: Utc::now(),
        }
    }

    pub fn into_record(self, id: impl Into<String>) -> DomainRecord {
        DomainRecord {
            id: id.into(),
            title: self.title,
            url: self.url,
            description: self.description,
            file_name: self.file_name,
            mapper_file_url: self.mapper_file_url,
            image_path: self.image_path,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Returns the final path component without its extension.
///
/// `uploads/Acme_mapper.xlsx` becomes `Acme_mapper`; a name without an
/// extension is returned unchanged.
pub fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
