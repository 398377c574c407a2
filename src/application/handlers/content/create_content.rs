//! CreateContentHandler - Upload a file and register it as content.

use std::sync::Arc;

use crate::domain::content::{Content, ContentError, ContentType};
use crate::domain::foundation::{ContentId, UserId};
use crate::ports::{Clock, ContentRepository, FileStorage, StorageError};

/// Command to publish a new content item.
#[derive(Debug, Clone)]
pub struct CreateContentCommand {
    pub owner: UserId,
    pub title: String,
    pub description: String,
    pub content_type: ContentType,
    pub price_cents: i64,
    /// Client-side file name; only its extension is used.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Handler for publishing content.
///
/// Metadata is checked first, then the file is uploaded before the record
/// is written. If the record cannot be saved, the uploaded file is removed
/// again.
pub struct CreateContentHandler {
    repository: Arc<dyn ContentRepository>,
    storage: Arc<dyn FileStorage>,
    clock: Arc<dyn Clock>,
}

impl CreateContentHandler {
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        storage: Arc<dyn FileStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            storage,
            clock,
        }
    }

    pub async fn handle(&self, cmd: CreateContentCommand) -> Result<Content, ContentError> {
        // 1. Extension must match the declared type; metadata must be valid
        cmd.content_type.validate_file_name(&cmd.file_name)?;
        Content::validate_metadata(&cmd.title, cmd.price_cents)?;

        // 2. Upload
        let stored = self
            .storage
            .upload(&cmd.owner, &cmd.file_name, &cmd.bytes)
            .await
            .map_err(storage_error)?;

        // 3. Build the entity
        let content = match Content::create(
            ContentId::new(),
            cmd.owner,
            cmd.title,
            cmd.description,
            cmd.content_type,
            cmd.price_cents,
            stored.path.clone(),
            self.clock.now(),
        ) {
            Ok(content) => content,
            Err(e) => {
                self.discard_upload(&stored.path).await;
                return Err(e.into());
            }
        };

        // 4. Persist
        if let Err(e) = self.repository.save(&content).await {
            self.discard_upload(&stored.path).await;
            return Err(e.into());
        }

        tracing::info!(
            content_id = %content.id,
            owner_id = %content.owner_id(),
            content_type = %content.content_type,
            size_bytes = stored.size_bytes,
            "Content created"
        );

        Ok(content)
    }

    async fn discard_upload(&self, path: &str) {
        if let Err(e) = self.storage.delete(path).await {
            tracing::warn!(path, error = %e, "Failed to remove orphaned upload");
        }
    }
}

pub(super) fn storage_error(err: StorageError) -> ContentError {
    match err {
        StorageError::FileTooLarge { .. } => ContentError::validation("file", err.to_string()),
        other => ContentError::storage(other.to_string()),
    }
}
