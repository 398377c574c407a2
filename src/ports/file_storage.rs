//! File storage port for uploaded content.
//!
//! The access rules never look inside storage; they only carry the
//! `path` returned here.

use crate::domain::foundation::UserId;
use async_trait::async_trait;
use thiserror::Error;

/// Where an upload landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Storage reference, relative to the store's root.
    pub path: String,
    pub size_bytes: u64,
    /// Hex SHA-256 of the bytes written.
    pub checksum: String,
}

/// Port for storing content files.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `bytes` for `owner`. `file_name` only contributes its extension.
    async fn upload(
        &self,
        owner: &UserId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError>;

    /// Remove a stored file.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Errors from file storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File too large: {size_bytes} bytes exceeds {max_bytes} byte limit")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl StorageError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(err.to_string()),
            _ => StorageError::Io(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_too_large_displays_sizes() {
        let err = StorageError::file_too_large(20, 10);
        assert_eq!(
            err.to_string(),
            "File too large: 20 bytes exceeds 10 byte limit"
        );
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(StorageError::from(io), StorageError::NotFound(_)));
    }

    #[test]
    fn file_storage_is_object_safe() {
        fn check<T: FileStorage + ?Sized>() {}
        check::<dyn FileStorage>();
    }
}
