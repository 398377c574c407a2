//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / NotFoundForUser | 404 |
//! | DuplicateActiveSubscription | 409 |
//! | NotOwner | 403 |
//! | Forbidden | 403 |
//! | PaymentFailed | 402 |
//! | InvalidState | 409 |
//! | ValidationFailed | 400 |
//! | InconsistentCancellation | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    DomainError, ErrorCode, SubscriptionId, UserId, ValidationError,
};

/// Subscription-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Subscription was not found.
    NotFound(SubscriptionId),

    /// User holds no subscription that is Active and inside its window.
    NotFoundForUser(UserId),

    /// User already holds an Active, unexpired subscription.
    DuplicateActiveSubscription(UserId),

    /// Requester does not own the subscription.
    NotOwner {
        subscription_id: SubscriptionId,
        requester: UserId,
    },

    /// Caller's role does not permit the operation.
    Forbidden(String),

    /// Payment provider rejected the authorization or cancellation.
    PaymentFailed { reason: String },

    /// Provider cancelled but the local status update did not land.
    InconsistentCancellation {
        subscription_id: SubscriptionId,
        reason: String,
    },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn not_found(id: SubscriptionId) -> Self {
        SubscriptionError::NotFound(id)
    }

    pub fn not_found_for_user(user_id: UserId) -> Self {
        SubscriptionError::NotFoundForUser(user_id)
    }

    pub fn duplicate_active(user_id: UserId) -> Self {
        SubscriptionError::DuplicateActiveSubscription(user_id)
    }

    pub fn not_owner(subscription_id: SubscriptionId, requester: UserId) -> Self {
        SubscriptionError::NotOwner {
            subscription_id,
            requester,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        SubscriptionError::Forbidden(message.into())
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        SubscriptionError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn inconsistent_cancellation(
        subscription_id: SubscriptionId,
        reason: impl Into<String>,
    ) -> Self {
        SubscriptionError::InconsistentCancellation {
            subscription_id,
            reason: reason.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        SubscriptionError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::NotFound(_) | SubscriptionError::NotFoundForUser(_) => {
                ErrorCode::SubscriptionNotFound
            }
            SubscriptionError::DuplicateActiveSubscription(_) => ErrorCode::SubscriptionExists,
            SubscriptionError::NotOwner { .. } => ErrorCode::NotOwner,
            SubscriptionError::Forbidden(_) => ErrorCode::Forbidden,
            SubscriptionError::PaymentFailed { .. } => ErrorCode::PaymentFailed,
            SubscriptionError::InconsistentCancellation { .. } => ErrorCode::InconsistentState,
            SubscriptionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::NotFound(id) => format!("Subscription not found: {}", id),
            SubscriptionError::NotFoundForUser(user_id) => {
                format!("No active subscription for user: {}", user_id)
            }
            SubscriptionError::DuplicateActiveSubscription(user_id) => {
                format!("User {} already has an active subscription", user_id)
            }
            SubscriptionError::NotOwner {
                subscription_id,
                requester,
            } => format!(
                "User {} does not own subscription {}",
                requester, subscription_id
            ),
            SubscriptionError::Forbidden(msg) => format!("Forbidden: {}", msg),
            SubscriptionError::PaymentFailed { reason } => format!("Payment failed: {}", reason),
            SubscriptionError::InconsistentCancellation {
                subscription_id,
                reason,
            } => format!(
                "Subscription {} was cancelled with the payment provider but not locally: {}",
                subscription_id, reason
            ),
            SubscriptionError::InvalidState { current, attempted } => {
                format!("Cannot {} subscription in {} state", attempted, current)
            }
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SubscriptionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    ///
    /// Payment failures are never retried automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubscriptionError::Infrastructure(_))
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<ValidationError> for SubscriptionError {
    fn from(err: ValidationError) -> Self {
        SubscriptionError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => SubscriptionError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.to_string(),
            },
            ErrorCode::ValidationFailed => SubscriptionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::PaymentFailed => SubscriptionError::PaymentFailed {
                reason: err.message,
            },
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-test-123").unwrap()
    }

    // ============================================================
    // Constructor Tests
    // ============================================================

    #[test]
    fn not_found_creates_correctly() {
        let id = SubscriptionId::new();
        let err = SubscriptionError::not_found(id);
        assert!(matches!(err, SubscriptionError::NotFound(i) if i == id));
        assert_eq!(err.code(), ErrorCode::SubscriptionNotFound);
    }

    #[test]
    fn duplicate_active_maps_to_exists_code() {
        let err = SubscriptionError::duplicate_active(test_user_id());
        assert_eq!(err.code(), ErrorCode::SubscriptionExists);
        assert!(err.message().contains("already has an active subscription"));
    }

    #[test]
    fn not_owner_names_requester() {
        let id = SubscriptionId::new();
        let err = SubscriptionError::not_owner(id, test_user_id());
        assert_eq!(err.code(), ErrorCode::NotOwner);
        assert!(err.message().contains("user-test-123"));
    }

    #[test]
    fn inconsistent_cancellation_is_not_retryable() {
        let err = SubscriptionError::inconsistent_cancellation(SubscriptionId::new(), "db down");
        assert_eq!(err.code(), ErrorCode::InconsistentState);
        assert!(!err.is_retryable());
    }

    // ============================================================
    // Retry Semantics
    // ============================================================

    #[test]
    fn only_infrastructure_is_retryable() {
        assert!(SubscriptionError::infrastructure("timeout").is_retryable());
        assert!(!SubscriptionError::payment_failed("card declined").is_retryable());
        assert!(!SubscriptionError::not_found(SubscriptionId::new()).is_retryable());
    }

    // ============================================================
    // Conversions
    // ============================================================

    #[test]
    fn from_validation_error_keeps_field() {
        let err: SubscriptionError = ValidationError::empty_field("user_id").into();
        assert!(matches!(
            err,
            SubscriptionError::ValidationFailed { ref field, .. } if field == "user_id"
        ));
    }

    #[test]
    fn from_domain_error_maps_state_transition() {
        let domain = DomainError::new(ErrorCode::InvalidStateTransition, "nope");
        let err: SubscriptionError = domain.into();
        assert!(matches!(err, SubscriptionError::InvalidState { .. }));
    }

    #[test]
    fn from_domain_error_defaults_to_infrastructure() {
        let domain = DomainError::database("connection refused");
        let err: SubscriptionError = domain.into();
        assert!(matches!(err, SubscriptionError::Infrastructure(_)));
    }

    #[test]
    fn into_domain_error_preserves_code() {
        let err = SubscriptionError::payment_failed("declined");
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::PaymentFailed);
        assert_eq!(domain.message, "Payment failed: declined");
    }
}
