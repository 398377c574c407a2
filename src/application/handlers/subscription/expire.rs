//! Demotion of a single Active subscription whose window has closed.
//!
//! Shared by the expiry sweep and by creation, which must clear a stale
//! Active row before the store will accept a new one.

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{Subscription, SweepFailure, SweepStage};
use crate::ports::{PaymentGateway, SubscriptionRepository};

/// Sets `subscription` to Expired, then asks the provider to cancel it.
///
/// The local update comes first; a provider failure after it leaves the
/// row Expired and is reported with `SweepStage::ProviderCancel`.
pub(crate) async fn expire_subscription(
    repository: &dyn SubscriptionRepository,
    payment: &dyn PaymentGateway,
    subscription: &Subscription,
    now: Timestamp,
) -> Result<(), SweepFailure> {
    let mut expired = subscription.clone();
    expired.expire(now).map_err(|e| SweepFailure {
        subscription_id: subscription.id,
        stage: SweepStage::StatusUpdate,
        reason: e.to_string(),
    })?;

    repository
        .update_status(&expired.id, expired.status, expired.updated_at)
        .await
        .map_err(|e| SweepFailure {
            subscription_id: subscription.id,
            stage: SweepStage::StatusUpdate,
            reason: e.to_string(),
        })?;

    payment
        .cancel(&subscription.id)
        .await
        .map_err(|e| SweepFailure {
            subscription_id: subscription.id,
            stage: SweepStage::ProviderCancel,
            reason: e.to_string(),
        })?;

    Ok(())
}
