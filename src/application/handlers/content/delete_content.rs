//! DeleteContentHandler - Owner removes a content item and its file.

use std::sync::Arc;

use crate::domain::content::ContentError;
use crate::domain::foundation::{ContentId, UserId};
use crate::ports::{ContentRepository, FileStorage};

/// Command to delete a content item.
#[derive(Debug, Clone)]
pub struct DeleteContentCommand {
    pub content_id: ContentId,
    pub requester: UserId,
}

/// Deletes the record first, then the stored file. A file that cannot be
/// removed is logged and left behind.
pub struct DeleteContentHandler {
    repository: Arc<dyn ContentRepository>,
    storage: Arc<dyn FileStorage>,
}

impl DeleteContentHandler {
    pub fn new(repository: Arc<dyn ContentRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    pub async fn handle(&self, cmd: DeleteContentCommand) -> Result<(), ContentError> {
        let content = self
            .repository
            .find_by_id(&cmd.content_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.content_id))?;

        if !content.is_owned_by(&cmd.requester) {
            return Err(ContentError::not_owner(cmd.content_id, cmd.requester));
        }

        self.repository.delete(&content.id).await?;

        if let Err(e) = self.storage.delete(&content.file_path).await {
            tracing::warn!(
                content_id = %content.id,
                path = %content.file_path,
                error = %e,
                "Content deleted but stored file was not removed"
            );
        }

        tracing::info!(content_id = %content.id, "Content deleted");
        Ok(())
    }
}
