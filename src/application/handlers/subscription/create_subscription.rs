//! CreateSubscriptionHandler - Command handler for opening a subscription.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{PlanType, Subscription, SubscriptionError, SweepStage};
use crate::ports::{Clock, PaymentGateway, SubscriptionRepository};

use super::expire::expire_subscription;

/// Command to open a subscription.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub user_id: UserId,
    pub plan: PlanType,
    pub start_date: Timestamp,
    /// Open-ended when `None`.
    pub end_date: Option<Timestamp>,
}

/// Handler for opening subscriptions.
///
/// The user may not already hold an Active subscription whose window is
/// open. An Active row whose window has closed is expired first so the
/// store's one-active-per-user rule does not block the new row.
pub struct CreateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    payment: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
}

impl CreateSubscriptionHandler {
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

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let now = self.clock.now();

        // 1. Build the entity first so bad input never reaches the provider
        let subscription = Subscription::create(
            SubscriptionId::new(),
            cmd.user_id.clone(),
            cmd.plan,
            cmd.start_date,
            cmd.end_date,
            now,
        )?;

        // 2. Duplicate check
        if let Some(existing) = self
            .repository
            .find_latest_active_by_user(&cmd.user_id)
            .await?
        {
            if existing.is_active_at(now) {
                return Err(SubscriptionError::duplicate_active(cmd.user_id));
            }
            self.clear_stale(&existing, now).await?;
        }

        // 3. Charge
        self.payment
            .authorize(&subscription.id, &subscription.user_id, subscription.plan)
            .await
            .map_err(|e| {
                tracing::warn!(
                    user_id = %subscription.user_id,
                    plan = %subscription.plan,
                    error = %e,
                    "Payment authorization failed"
                );
                SubscriptionError::payment_failed(e.to_string())
            })?;

        // 4. Persist; the store has the final word on duplicates
        if let Err(e) = self.repository.save(&subscription).await {
            self.release_authorization(&subscription).await;
            if e.code == ErrorCode::SubscriptionExists {
                return Err(SubscriptionError::duplicate_active(cmd.user_id));
            }
            return Err(e.into());
        }

        tracing::info!(
            subscription_id = %subscription.id,
            user_id = %subscription.user_id,
            plan = %subscription.plan,
            "Subscription created"
        );

        Ok(subscription)
    }

    async fn clear_stale(
        &self,
        stale: &Subscription,
        now: Timestamp,
    ) -> Result<(), SubscriptionError> {
        tracing::info!(
            subscription_id = %stale.id,
            user_id = %stale.user_id,
            "Expiring lapsed subscription ahead of sweep"
        );

        match expire_subscription(self.repository.as_ref(), self.payment.as_ref(), stale, now).await
        {
            Ok(()) => Ok(()),
            Err(failure) if failure.stage == SweepStage::ProviderCancel => {
                tracing::warn!(
                    subscription_id = %stale.id,
                    reason = %failure.reason,
                    "Provider cancellation of lapsed subscription failed"
                );
                Ok(())
            }
            Err(failure) => Err(SubscriptionError::infrastructure(failure.reason)),
        }
    }

    async fn release_authorization(&self, subscription: &Subscription) {
        if let Err(e) = self.payment.cancel(&subscription.id).await {
            tracing::error!(
                subscription_id = %subscription.id,
                error = %e,
                "Authorized payment could not be released after failed save"
            );
        }
    }
}
