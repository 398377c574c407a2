//! Subscription repository port.
//!
//! # Uniqueness
//!
//! Implementations must refuse a second `Active` row for the same user
//! with `ErrorCode::SubscriptionExists`. Creation checks first, but the
//! check and the insert are separate calls, so the store is the final
//! word when two requests race.

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use async_trait::async_trait;

/// Repository port for subscription persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Save a new subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionExists` if the user already has an Active row
    /// - `DatabaseError` on persistence failure
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Overwrite the stored status.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the row doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_status(
        &self,
        id: &SubscriptionId,
        status: SubscriptionStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Find a subscription by its ID.
    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Most recently created subscription with stored status Active.
    ///
    /// The time window is not checked here.
    async fn find_latest_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, DomainError>;

    /// Active rows whose `end_date` is set and `<= as_of`.
    async fn list_expired(&self, as_of: Timestamp) -> Result<Vec<Subscription>, DomainError>;

    /// Physically remove a subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the row doesn't exist
    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError>;
}
