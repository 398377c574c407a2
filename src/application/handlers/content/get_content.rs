//! GetContentHandler - Read a content item through the access check.

use std::sync::Arc;

use crate::application::AccessAuthorizer;
use crate::domain::content::{AccessGrant, Content, ContentError};
use crate::domain::foundation::{ContentId, UserId};
use crate::ports::ContentRepository;

/// Query for one content item.
#[derive(Debug, Clone)]
pub struct GetContentQuery {
    pub content_id: ContentId,
    pub requester: UserId,
}

/// Content plus the reason the requester may see it.
#[derive(Debug, Clone)]
pub struct GetContentResult {
    pub content: Content,
    pub grant: AccessGrant,
}

pub struct GetContentHandler {
    repository: Arc<dyn ContentRepository>,
    authorizer: Arc<AccessAuthorizer>,
}

impl GetContentHandler {
    pub fn new(repository: Arc<dyn ContentRepository>, authorizer: Arc<AccessAuthorizer>) -> Self {
        Self {
            repository,
            authorizer,
        }
    }

    pub async fn handle(&self, query: GetContentQuery) -> Result<GetContentResult, ContentError> {
        let content = self
            .repository
            .find_by_id(&query.content_id)
            .await?
            .ok_or_else(|| ContentError::not_found(query.content_id))?;

        let grant = self
            .authorizer
            .can_access(&content, &query.requester)
            .await?;

        Ok(GetContentResult { content, grant })
    }
}
