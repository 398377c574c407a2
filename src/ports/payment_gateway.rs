//! Payment gateway port.
//!
//! The core only needs two things from a payment provider: charge a user
//! for a plan, and stop charging for a subscription. Failures are opaque
//! to the core and stop the operation in progress; nothing is retried
//! automatically.

use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::PlanType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for payment provider operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start billing `user_id` on `plan`.
    ///
    /// `subscription_id` is the local id the provider-side subscription is
    /// tagged with, so `cancel` can find it later.
    async fn authorize(
        &self,
        subscription_id: &SubscriptionId,
        user_id: &UserId,
        plan: PlanType,
    ) -> Result<(), PaymentError>;

    /// Stop billing for a subscription.
    async fn cancel(&self, subscription_id: &SubscriptionId) -> Result<(), PaymentError>;
}

/// Payment error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create a card declined error.
    pub fn declined(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Declined, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(PaymentErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Create a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Provider rejected the charge.
    Declined,

    /// Resource not found at the provider.
    NotFound,

    /// Provider API error.
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::Declined => "declined",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
