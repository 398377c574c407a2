//! UpdateContentHandler - Owner edits content metadata.

use std::sync::Arc;

use crate::domain::content::{Content, ContentError};
use crate::domain::foundation::{ContentId, UserId};
use crate::ports::{Clock, ContentRepository};

/// Command to replace a content item's editable metadata.
#[derive(Debug, Clone)]
pub struct UpdateContentCommand {
    pub content_id: ContentId,
    pub requester: UserId,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
}

pub struct UpdateContentHandler {
    repository: Arc<dyn ContentRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateContentHandler {
    pub fn new(repository: Arc<dyn ContentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: UpdateContentCommand) -> Result<Content, ContentError> {
        let mut content = self
            .repository
            .find_by_id(&cmd.content_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.content_id))?;

        if !content.is_owned_by(&cmd.requester) {
            return Err(ContentError::not_owner(cmd.content_id, cmd.requester));
        }

        content.update(cmd.title, cmd.description, cmd.price_cents, self.clock.now())?;
        self.repository.update(&content).await?;

        tracing::info!(content_id = %content.id, "Content updated");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::memory::InMemoryContentRepository;
    use crate::domain::content::ContentType;
    use crate::domain::foundation::Timestamp;

    fn owner() -> UserId {
        UserId::new("alice").unwrap()
    }

    async fn setup() -> (UpdateContentHandler, InMemoryContentRepository, Content) {
        let repository = InMemoryContentRepository::new();
        let content = Content::create(
            ContentId::new(),
            owner(),
            "Harbour",
            "",
            ContentType::Image,
            100,
            "user_alice/h.png",
            Timestamp::from_ymd(2024, 1, 1).unwrap(),
        )
        .unwrap();
        repository.save(&content).await.unwrap();

        let clock = Arc::new(ManualClock::new(Timestamp::from_ymd(2024, 1, 2).unwrap()));
        let handler = UpdateContentHandler::new(Arc::new(repository.clone()), clock);
        (handler, repository, content)
    }

    fn edit(content: &Content, requester: UserId, price_cents: i64) -> UpdateContentCommand {
        UpdateContentCommand {
            content_id: content.id,
            requester,
            title: "Harbour (remastered)".to_string(),
            description: "now in colour".to_string(),
            price_cents,
        }
    }

    #[tokio::test]
    async fn owner_updates_metadata() {
        let (handler, repository, content) = setup().await;

        let updated = handler.handle(edit(&content, owner(), 250)).await.unwrap();

        assert_eq!(updated.title, "Harbour (remastered)");
        assert_eq!(updated.price_cents, 250);
        assert_eq!(updated.file_path, content.file_path);
        let stored = repository.find_by_id(&content.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn non_owner_is_rejected() {
        let (handler, _, content) = setup().await;
        let bob = UserId::new("bob").unwrap();

        let err = handler.handle(edit(&content, bob.clone(), 250)).await.unwrap_err();

        assert_eq!(err, ContentError::not_owner(content.id, bob));
    }

    #[tokio::test]
    async fn invalid_price_leaves_stored_content_untouched() {
        let (handler, repository, content) = setup().await;

        let err = handler.handle(edit(&content, owner(), -10)).await.unwrap_err();

        assert!(matches!(err, ContentError::ValidationFailed { .. }));
        let stored = repository.find_by_id(&content.id).await.unwrap().unwrap();
        assert_eq!(stored, content);
    }
}
