//! In-memory content repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::Content;
use crate::domain::foundation::{ContentId, DomainError, ErrorCode, UserId};
use crate::ports::ContentRepository;

/// `ContentRepository` held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRepository {
    rows: Arc<RwLock<HashMap<ContentId, Content>>>,
    fail_saves: Arc<RwLock<bool>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `save` fail, to exercise upload rollback.
    pub async fn fail_saves(&self, fail: bool) {
        *self.fail_saves.write().await = fail;
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found(id: &ContentId) -> DomainError {
    DomainError::new(ErrorCode::ContentNotFound, format!("Content not found: {}", id))
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn save(&self, content: &Content) -> Result<(), DomainError> {
        if *self.fail_saves.read().await {
            return Err(DomainError::database("Simulated save failure"));
        }
        self.rows.write().await.insert(content.id, content.clone());
        Ok(())
    }

    async fn update(&self, content: &Content) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&content.id) {
            Some(row) => {
                *row = content.clone();
                Ok(())
            }
            None => Err(not_found(&content.id)),
        }
    }

    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Content>, DomainError> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Content>, DomainError> {
        let rows = self.rows.read().await;
        let mut owned: Vec<Content> = rows
            .values()
            .filter(|c| c.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete(&self, id: &ContentId) -> Result<(), DomainError> {
        match self.rows.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ContentType;
    use crate::domain::foundation::Timestamp;

    fn item(owner: &str, day: u32) -> Content {
        Content::create(
            ContentId::new(),
            UserId::new(owner).unwrap(),
            "Title",
            "",
            ContentType::Image,
            100,
            format!("{}/x.png", owner),
            Timestamp::from_ymd(2024, 1, day).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn find_by_owner_is_newest_first() {
        let repo = InMemoryContentRepository::new();
        let old = item("a", 1);
        let new = item("a", 9);
        repo.save(&old).await.unwrap();
        repo.save(&new).await.unwrap();
        repo.save(&item("b", 5)).await.unwrap();

        let owned = repo.find_by_owner(&UserId::new("a").unwrap()).await.unwrap();
        assert_eq!(owned.iter().map(|c| c.id).collect::<Vec<_>>(), vec![new.id, old.id]);
    }

    #[tokio::test]
    async fn update_of_unknown_item_fails() {
        let repo = InMemoryContentRepository::new();
        let err = repo.update(&item("a", 1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ContentNotFound);
    }
}
