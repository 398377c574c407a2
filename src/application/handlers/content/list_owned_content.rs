//! ListOwnedContentHandler - An owner's catalogue.

use std::sync::Arc;

use crate::domain::content::{Content, ContentError};
use crate::domain::foundation::UserId;
use crate::ports::ContentRepository;

/// Query for every item a user owns, newest first.
#[derive(Debug, Clone)]
pub struct ListOwnedContentQuery {
    pub owner: UserId,
}

pub struct ListOwnedContentHandler {
    repository: Arc<dyn ContentRepository>,
}

impl ListOwnedContentHandler {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListOwnedContentQuery) -> Result<Vec<Content>, ContentError> {
        Ok(self.repository.find_by_owner(&query.owner).await?)
    }
}
