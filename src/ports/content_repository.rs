//! Content repository port.

use crate::domain::content::Content;
use crate::domain::foundation::{ContentId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for content persistence.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Save a new content item.
    async fn save(&self, content: &Content) -> Result<(), DomainError>;

    /// Persist changed metadata of an existing item.
    ///
    /// # Errors
    ///
    /// - `ContentNotFound` if the item doesn't exist
    async fn update(&self, content: &Content) -> Result<(), DomainError>;

    /// Find a content item by its ID.
    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Content>, DomainError>;

    /// All items owned by a user, newest first.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Content>, DomainError>;

    /// Remove an item.
    ///
    /// # Errors
    ///
    /// - `ContentNotFound` if the item doesn't exist
    async fn delete(&self, id: &ContentId) -> Result<(), DomainError>;
}
