//! SweepExpiredSubscriptionsHandler - Batch demotion of lapsed subscriptions.

use std::sync::Arc;

use crate::domain::subscription::{SubscriptionError, SweepStage, SweepSummary};
use crate::ports::{Clock, PaymentGateway, SubscriptionRepository};

use super::expire::expire_subscription;

/// Sets every Active subscription whose `end_date <= now` to Expired and
/// cancels it with the provider.
///
/// Items are processed one at a time. A failing item is recorded in the
/// summary and the batch moves on; nothing is retried within a run. Rows
/// already demoted by an earlier run are no longer listed, so an
/// immediate second run examines nothing.
pub struct SweepExpiredSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
    payment: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
}

impl SweepExpiredSubscriptionsHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        payment: Arc<dyn PaymentGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            payment,
            clock,
        }
    }

    /// Runs one sweep.
    ///
    /// # Errors
    ///
    /// Only a failure to list candidates aborts the run.
    pub async fn handle(&self) -> Result<SweepSummary, SubscriptionError> {
        let now = self.clock.now();
        let candidates = self.repository.list_expired(now).await?;

        let mut summary = SweepSummary {
            examined: candidates.len(),
            ..Default::default()
        };

        for subscription in &candidates {
            match expire_subscription(
                self.repository.as_ref(),
                self.payment.as_ref(),
                subscription,
                now,
            )
            .await
            {
                Ok(()) => summary.record_expired(),
                Err(failure) => {
                    match failure.stage {
                        SweepStage::StatusUpdate => {
                            tracing::error!(
                                subscription_id = %failure.subscription_id,
                                stage = "status_update",
                                reason = %failure.reason,
                                "Failed to expire subscription"
                            );
                        }
                        SweepStage::ProviderCancel => {
                            summary.record_expired();
                            tracing::warn!(
                                subscription_id = %failure.subscription_id,
                                stage = "provider_cancel",
                                reason = %failure.reason,
                                "Subscription expired locally but provider cancellation failed"
                            );
                        }
                    }
                    summary.record_failure(failure.subscription_id, failure.stage, failure.reason);
                }
            }
        }

        if summary.is_noop() {
            tracing::debug!("Expiry sweep found nothing to do");
        } else {
            tracing::info!(
                examined = summary.examined,
                expired = summary.expired,
                failed = summary.failure_count(),
                "Expiry sweep completed"
            );
        }

        Ok(summary)
    }
}
