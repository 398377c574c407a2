//! Content aggregate entity.
//!
//! # Invariants
//!
//! - `title` is non-empty
//! - `price_cents >= 0` (money in cents, never floats)
//! - `owner_id` never changes after creation

use crate::domain::foundation::{ContentId, Timestamp, UserId, ValidationError};
use serde::Serialize;

use super::ContentType;

/// A paid media item. Serialize-only; stored rows come back through
/// `reconstitute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub id: ContentId,
    owner_id: UserId,
    pub title: String,
    pub description: String,
    pub content_type: ContentType,
    pub price_cents: i64,
    /// Storage reference returned by the file store at upload time.
    pub file_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Content {
    /// Creates a new content item.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: ContentId,
        owner_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        content_type: ContentType,
        price_cents: i64,
        file_path: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let file_path = file_path.into();
        Self::validate_metadata(&title, price_cents)?;
        if file_path.trim().is_empty() {
            return Err(ValidationError::empty_field("file_path"));
        }

        Ok(Self {
            id,
            owner_id,
            title,
            description: description.into(),
            content_type,
            price_cents,
            file_path,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks title and price ahead of creation, e.g. before an upload.
    pub fn validate_metadata(title: &str, price_cents: i64) -> Result<(), ValidationError> {
        validate_title(title)?;
        validate_price(price_cents)
    }

    /// Rebuilds a stored item without re-running creation checks.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ContentId,
        owner_id: UserId,
        title: String,
        description: String,
        content_type: ContentType,
        price_cents: i64,
        file_path: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            description,
            content_type,
            price_cents,
            file_path,
            created_at,
            updated_at,
        }
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Replaces the editable metadata. Nothing changes on error.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        price_cents: i64,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        validate_price(price_cents)?;

        self.title = title;
        self.description = description.into();
        self.price_cents = price_cents;
        self.updated_at = now;
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(())
}

fn validate_price(price_cents: i64) -> Result<(), ValidationError> {
    if price_cents < 0 {
        return Err(ValidationError::out_of_range(
            "price_cents",
            0,
            i64::MAX,
            price_cents,
        ));
    }
    Ok(())
}
