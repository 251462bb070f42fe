use serde::Deserialize;
use std::path::Path;

use crate::domain::errors::{DomainError, Result};

/// A file received with a request, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Final component of the client-supplied name. Clients on some
    /// platforms send full paths with either separator.
    pub fn original_name(&self) -> &str {
        self.file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim()
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(self.original_name())
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Mapper,
    Image,
}

impl FileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mapper => "mapper file",
            Self::Image => "image",
        }
    }
}

/// Which extensions are accepted for each uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    pub mapper_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            mapper_extensions: vec!["xlsx".into(), "xls".into()],
            image_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        }
    }
}

impl UploadPolicy {
    fn allowed(&self, role: FileRole) -> &[String] {
        match role {
            FileRole::Mapper => &self.mapper_extensions,
            FileRole::Image => &self.image_extensions,
        }
    }

    pub fn check(&self, role: FileRole, file: &UploadedFile) -> Result<()> {
        let name = file.original_name();
        if name.is_empty() || name == "." || name == ".." {
            return Err(DomainError::validation(format!(
                "{} has no usable file name",
                role.as_str()
            )));
        }

        let allowed = self.allowed(role);
        match file.extension() {
            Some(ext) if allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)) => Ok(()),
            _ => Err(DomainError::validation(format!(
                "{} must be one of: {}",
                role.as_str(),
                allowed
                    .iter()
                    .map(|a| format!(".{a}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

/// Storage name for a mapper file: `{title}_{originalFileName}`.
pub fn mapper_storage_name(title: &str, file: &UploadedFile) -> String {
    format!("{}_{}", title.replace(['/', '\\'], "_"), file.original_name())
}

/// Storage name for an image: the original file name, unprefixed.
pub fn image_storage_name(file: &UploadedFile) -> String {
    file.original_name().to_string()
}
