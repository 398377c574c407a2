//! Content-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | NotOwner | 403 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Storage | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{ContentId, DomainError, ErrorCode, UserId, ValidationError};

use super::AccessDeniedReason;

/// Content-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Content item was not found.
    NotFound(ContentId),

    /// Requester is not the owner of the item.
    NotOwner {
        content_id: ContentId,
        requester: UserId,
    },

    /// Requester holds no entitlement to read the item.
    Forbidden(AccessDeniedReason),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// File store failure.
    Storage(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl ContentError {
    pub fn not_found(id: ContentId) -> Self {
        ContentError::NotFound(id)
    }

    pub fn not_owner(content_id: ContentId, requester: UserId) -> Self {
        ContentError::NotOwner {
            content_id,
            requester,
        }
    }

    pub fn forbidden(reason: AccessDeniedReason) -> Self {
        ContentError::Forbidden(reason)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ContentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ContentError::Storage(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ContentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ContentError::NotFound(_) => ErrorCode::ContentNotFound,
            ContentError::NotOwner { .. } => ErrorCode::NotOwner,
            ContentError::Forbidden(_) => ErrorCode::Forbidden,
            ContentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ContentError::Storage(_) => ErrorCode::StorageError,
            ContentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            ContentError::NotFound(id) => format!("Content not found: {}", id),
            ContentError::NotOwner {
                content_id,
                requester,
            } => format!("User {} does not own content {}", requester, content_id),
            ContentError::Forbidden(reason) => reason.user_message().to_string(),
            ContentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ContentError::Storage(msg) => format!("Storage error: {}", msg),
            ContentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContentError::Storage(_) | ContentError::Infrastructure(_)
        )
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ContentError {}

impl From<ValidationError> for ContentError {
    fn from(err: ValidationError) -> Self {
        ContentError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ContentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ContentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::StorageError => ContentError::Storage(err.message),
            _ => ContentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ContentError> for DomainError {
    fn from(err: ContentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
