//! Local filesystem storage for content uploads.
//!
//! # Directory Structure
//!
//! ```text
//! {base_path}/
//! ├── user_abc123/
//! │   ├── 5f0c...e1.png
//! │   └── 9a7b...42.mp4
//! └── user_xyz987/
//!     └── 13d2...aa.jpg
//! ```
//!
//! Writes go to `{name}.tmp`, are synced, then renamed into place, so a
//! crash never leaves a half-written file under its final name.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::foundation::UserId;
use crate::ports::{FileStorage, StorageError, StoredFile};

/// Default maximum upload size (200 MB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 200 * 1024 * 1024;

/// Filesystem-backed `FileStorage`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_path: PathBuf,
    max_file_size_bytes: u64,
}

impl LocalFileStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }

    pub fn with_max_file_size(mut self, max_bytes: u64) -> Self {
        self.max_file_size_bytes = max_bytes;
        self
    }

    /// Absolute location of a stored reference.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(StorageError::invalid_path(path));
        }
        Ok(self.base_path.join(relative))
    }

    /// Directory name for a user. Anything outside `[A-Za-z0-9_-]` becomes `_`.
    fn user_dir_name(user_id: &UserId) -> String {
        let cleaned: String = user_id
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("user_{}", cleaned)
    }

    fn extension_of(file_name: &str) -> Option<String> {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    fn compute_checksum(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }
}

impl LocalFileStorage {
    /// Writes `bytes` to `temp_path`, then renames it over `final_path`.
    /// The temp file is removed if any step fails.
    async fn write_atomically(
        temp_path: &Path,
        final_path: &Path,
        bytes: &[u8],
    ) -> Result<(), StorageError> {
        let result = Self::write_then_rename(temp_path, final_path, bytes).await;
        if result.is_err() {
            if let Err(e) = fs::remove_file(temp_path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %temp_path.display(), error = %e, "Temp upload not removed");
                }
            }
        }
        result
    }

    async fn write_then_rename(
        temp_path: &Path,
        final_path: &Path,
        bytes: &[u8],
    ) -> Result<(), StorageError> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            StorageError::io(format!("Failed to create {}: {}", temp_path.display(), e))
        })?;
        file.write_all(bytes).await.map_err(|e| {
            StorageError::io(format!("Failed to write {}: {}", temp_path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::io(format!("Failed to sync {}: {}", temp_path.display(), e))
        })?;
        drop(file);

        fs::rename(temp_path, final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn upload(
        &self,
        owner: &UserId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError> {
        let size = bytes.len() as u64;
        if size > self.max_file_size_bytes {
            return Err(StorageError::file_too_large(size, self.max_file_size_bytes));
        }

        let dir_name = Self::user_dir_name(owner);
        let stored_name = match Self::extension_of(file_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let relative = format!("{}/{}", dir_name, stored_name);

        let dir = self.base_path.join(&dir_name);
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::io(format!("Failed to create directory {}: {}", dir.display(), e))
        })?;

        let final_path = dir.join(&stored_name);
        let temp_path = dir.join(format!("{}.tmp", stored_name));

        Self::write_atomically(&temp_path, &final_path, bytes).await?;

        tracing::debug!(path = %relative, size_bytes = size, "Stored upload");

        Ok(StoredFile {
            path: relative,
            size_bytes: size,
            checksum: Self::compute_checksum(bytes),
        })
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        fs::remove_file(&full).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(path),
            _ => StorageError::io(format!("Failed to delete {}: {}", full.display(), e)),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
