use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    FileMissing(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn file_missing(msg: impl Into<String>) -> Self {
        Self::FileMissing(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Stable identifier reported in the `error` field of failure bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Conflict(_) => "conflict_error",
            Self::NotFound(_) => "not_found_error",
            Self::FileMissing(_) => "file_missing_error",
            Self::Storage(_) => "storage_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(DomainError::validation("x").kind(), "validation_error");
        assert_eq!(DomainError::conflict("x").kind(), "conflict_error");
        assert_eq!(DomainError::not_found("x").kind(), "not_found_error");
        assert_eq!(DomainError::file_missing("x").kind(), "file_missing_error");
        assert_eq!(DomainError::storage("x").kind(), "storage_error");
    }

    #[test]
    fn test_storage_message_is_prefixed() {
        assert_eq!(
            DomainError::storage("disk full").to_string(),
            "Storage error: disk full"
        );
        assert_eq!(
            DomainError::validation("title is required").to_string(),
            "title is required"
        );
    }
}
