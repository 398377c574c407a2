//! CancelSubscriptionHandler - Command handler for owner cancellation.

use std::sync::Arc;

use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{Clock, PaymentGateway, SubscriptionRepository};

/// Command to cancel a subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub requester: UserId,
}

/// Handler for cancelling subscriptions.
///
/// The provider is cancelled before the local row. If the local update
/// then fails the two sides disagree, which is surfaced as
/// `InconsistentCancellation` and logged at error level.
pub struct CancelSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    payment: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
}

impl CancelSubscriptionHandler {
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
        cmd: CancelSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        // 1. Load and check ownership
        let mut subscription = self
            .repository
            .find_by_id(&cmd.subscription_id)
            .await?
            .ok_or_else(|| SubscriptionError::not_found(cmd.subscription_id))?;

        if !subscription.is_owned_by(&cmd.requester) {
            return Err(SubscriptionError::not_owner(
                cmd.subscription_id,
                cmd.requester,
            ));
        }

        // 2. Domain transition
        let current = subscription.status;
        subscription
            .cancel(self.clock.now())
            .map_err(|_| SubscriptionError::invalid_state(current.as_str(), "cancel"))?;

        // 3. Provider first
        self.payment
            .cancel(&subscription.id)
            .await
            .map_err(|e| SubscriptionError::payment_failed(e.to_string()))?;

        // 4. Local status
        if let Err(e) = self
            .repository
            .update_status(&subscription.id, subscription.status, subscription.updated_at)
            .await
        {
            tracing::error!(
                subscription_id = %subscription.id,
                user_id = %subscription.user_id,
                error = %e,
                "Provider cancellation succeeded but local status update failed"
            );
            return Err(SubscriptionError::inconsistent_cancellation(
                subscription.id,
                e.to_string(),
            ));
        }

        tracing::info!(
            subscription_id = %subscription.id,
            user_id = %subscription.user_id,
            "Subscription cancelled"
        );

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::memory::InMemorySubscriptionRepository;
    use crate::adapters::payment::{GatewayCall, MockPaymentGateway};
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscription::{PlanType, SubscriptionStatus};
    use crate::ports::PaymentError;

    fn day(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_ymd(y, m, d).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    struct Fixture {
        repository: InMemorySubscriptionRepository,
        payment: MockPaymentGateway,
        handler: CancelSubscriptionHandler,
        subscription: Subscription,
    }

    async fn fixture() -> Fixture {
        let repository = InMemorySubscriptionRepository::new();
        let payment = MockPaymentGateway::new();
        let clock = Arc::new(ManualClock::new(day(2024, 1, 10)));

        let subscription = Subscription::create(
            SubscriptionId::new(),
            user("alice"),
            PlanType::Premium,
            day(2024, 1, 1),
            Some(day(2024, 2, 1)),
            day(2024, 1, 1),
        )
        .unwrap();
        repository.save(&subscription).await.unwrap();

        let handler = CancelSubscriptionHandler::new(
            Arc::new(repository.clone()),
            Arc::new(payment.clone()),
            clock,
        );
        Fixture {
            repository,
            payment,
            handler,
            subscription,
        }
    }

    fn cancel_as(f: &Fixture, requester: &str) -> CancelSubscriptionCommand {
        CancelSubscriptionCommand {
            subscription_id: f.subscription.id,
            requester: user(requester),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn owner_cancel_sets_inactive() {
        let f = fixture().await;

        let cancelled = f.handler.handle(cancel_as(&f, "alice")).await.unwrap();

        assert_eq!(cancelled.status, SubscriptionStatus::Inactive);
        assert_eq!(cancelled.updated_at, day(2024, 1, 10));
        let stored = f.repository.get(&f.subscription.id).await.unwrap();
        assert_eq!(stored.status, SubscriptionStatus::Inactive);
        assert_eq!(
            f.payment.calls(),
            vec![GatewayCall::Cancel {
                subscription_id: f.subscription.id
            }]
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Guards
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unknown_subscription_is_not_found() {
        let f = fixture().await;
        let id = SubscriptionId::new();

        let err = f
            .handler
            .handle(CancelSubscriptionCommand {
                subscription_id: id,
                requester: user("alice"),
            })
            .await
            .unwrap_err();

        assert_eq!(err, SubscriptionError::not_found(id));
    }

    #[tokio::test]
    async fn non_owner_is_rejected_and_status_unchanged() {
        let f = fixture().await;

        let err = f.handler.handle(cancel_as(&f, "mallory")).await.unwrap_err();

        assert_eq!(
            err,
            SubscriptionError::not_owner(f.subscription.id, user("mallory"))
        );
        let stored = f.repository.get(&f.subscription.id).await.unwrap();
        assert_eq!(stored.status, SubscriptionStatus::Active);
        assert!(f.payment.calls().is_empty());
    }

    #[tokio::test]
    async fn already_cancelled_is_invalid_state() {
        let f = fixture().await;
        f.handler.handle(cancel_as(&f, "alice")).await.unwrap();

        let err = f.handler.handle(cancel_as(&f, "alice")).await.unwrap_err();

        assert!(matches!(err, SubscriptionError::InvalidState { .. }));
        assert_eq!(f.payment.cancelled_ids().len(), 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Partial failures
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn provider_failure_leaves_row_active() {
        let f = fixture().await;
        f.payment.fail_cancel(PaymentError::network("timeout"));

        let err = f.handler.handle(cancel_as(&f, "alice")).await.unwrap_err();

        assert!(matches!(err, SubscriptionError::PaymentFailed { .. }));
        let stored = f.repository.get(&f.subscription.id).await.unwrap();
        assert_eq!(stored.status, SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn local_failure_after_provider_cancel_is_inconsistent() {
        let f = fixture().await;
        f.repository.fail_status_update_for(f.subscription.id).await;

        let err = f.handler.handle(cancel_as(&f, "alice")).await.unwrap_err();

        assert!(matches!(
            err,
            SubscriptionError::InconsistentCancellation { subscription_id, .. }
                if subscription_id == f.subscription.id
        ));
        assert_eq!(f.payment.cancelled_ids(), vec![f.subscription.id]);
    }
}
