//! Integration tests for the subscription ledger.
//!
//! These tests drive the handlers end to end against the in-memory
//! repository, the scripted payment gateway, and a manual clock:
//! 1. Create, look up, and let a subscription lapse
//! 2. Sweep lapsed subscriptions and confirm a second run is a no-op
//! 3. Duplicate and foreign-owner requests are rejected without side effects

use std::sync::Arc;

use chrono::Duration;

use kimiyomi::adapters::{InMemorySubscriptionRepository, ManualClock, MockPaymentGateway};
use kimiyomi::application::handlers::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CreateSubscriptionCommand,
    CreateSubscriptionHandler, GetCurrentSubscriptionHandler, GetCurrentSubscriptionQuery,
    SweepExpiredSubscriptionsHandler,
};
use kimiyomi::domain::foundation::{Timestamp, UserId};
use kimiyomi::domain::subscription::{PlanType, SubscriptionError, SubscriptionStatus};
use kimiyomi::ports::PaymentError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn day(y: i32, m: u32, d: u32) -> Timestamp {
    Timestamp::from_ymd(y, m, d).unwrap()
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

struct Ledger {
    repository: InMemorySubscriptionRepository,
    payment: MockPaymentGateway,
    clock: Arc<ManualClock>,
    create: CreateSubscriptionHandler,
    cancel: CancelSubscriptionHandler,
    current: GetCurrentSubscriptionHandler,
    sweep: SweepExpiredSubscriptionsHandler,
}

impl Ledger {
    fn starting_at(start: Timestamp) -> Self {
        let repository = InMemorySubscriptionRepository::new();
        let payment = MockPaymentGateway::new();
        let clock = Arc::new(ManualClock::new(start));

        Self {
            create: CreateSubscriptionHandler::new(
                Arc::new(repository.clone()),
                Arc::new(payment.clone()),
                clock.clone(),
            ),
            cancel: CancelSubscriptionHandler::new(
                Arc::new(repository.clone()),
                Arc::new(payment.clone()),
                clock.clone(),
            ),
            current: GetCurrentSubscriptionHandler::new(Arc::new(repository.clone()), clock.clone()),
            sweep: SweepExpiredSubscriptionsHandler::new(
                Arc::new(repository.clone()),
                Arc::new(payment.clone()),
                clock.clone(),
            ),
            repository,
            payment,
            clock,
        }
    }

    fn january(user_id: &str) -> CreateSubscriptionCommand {
        CreateSubscriptionCommand {
            user_id: user(user_id),
            plan: PlanType::Basic,
            start_date: day(2024, 1, 1),
            end_date: Some(day(2024, 2, 1)),
        }
    }

    async fn current_for(&self, user_id: &str) -> Result<kimiyomi::domain::subscription::Subscription, SubscriptionError> {
        self.current
            .handle(GetCurrentSubscriptionQuery {
                user_id: user(user_id),
            })
            .await
    }
}

// =============================================================================
// Window and expiry
// =============================================================================

#[tokio::test]
async fn subscription_is_current_inside_its_window_only() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    let created = ledger.create.handle(Ledger::january("alice")).await.unwrap();

    ledger.clock.set(day(2024, 1, 15));
    assert_eq!(ledger.current_for("alice").await.unwrap().id, created.id);

    // Still flagged Active, but the window has closed
    ledger.clock.set(day(2024, 2, 2));
    assert_eq!(
        ledger.current_for("alice").await,
        Err(SubscriptionError::NotFoundForUser(user("alice")))
    );
    assert_eq!(
        ledger.repository.get(&created.id).await.unwrap().status,
        SubscriptionStatus::Active
    );
}

#[tokio::test]
async fn window_closes_exactly_at_end_date() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    ledger.create.handle(Ledger::january("alice")).await.unwrap();

    ledger.clock.set(day(2024, 2, 1));
    assert!(ledger.current_for("alice").await.is_err());
}

#[tokio::test]
async fn sweep_expires_lapsed_subscriptions_once() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    let lapsed = ledger.create.handle(Ledger::january("alice")).await.unwrap();
    let open_ended = ledger
        .create
        .handle(CreateSubscriptionCommand {
            user_id: user("bob"),
            plan: PlanType::Premium,
            start_date: day(2024, 1, 1),
            end_date: None,
        })
        .await
        .unwrap();

    ledger.clock.set(day(2024, 2, 2));
    let first = ledger.sweep.handle().await.unwrap();
    assert_eq!(first.examined, 1);
    assert_eq!(first.expired, 1);
    assert_eq!(first.failure_count(), 0);

    let swept = ledger.repository.get(&lapsed.id).await.unwrap();
    assert_eq!(swept.status, SubscriptionStatus::Expired);
    assert_eq!(ledger.payment.cancelled_ids(), vec![lapsed.id]);

    let untouched = ledger.repository.get(&open_ended.id).await.unwrap();
    assert_eq!(untouched.status, SubscriptionStatus::Active);

    let second = ledger.sweep.handle().await.unwrap();
    assert!(second.is_noop());
    assert_eq!(ledger.payment.cancelled_ids().len(), 1);
}

#[tokio::test]
async fn provider_failure_during_sweep_still_expires_locally() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    let lapsed = ledger.create.handle(Ledger::january("alice")).await.unwrap();
    ledger.payment.fail_cancel(PaymentError::network("timeout"));

    ledger.clock.set(day(2024, 2, 2));
    let summary = ledger.sweep.handle().await.unwrap();

    assert_eq!(summary.expired, 1);
    assert_eq!(summary.failure_count(), 1);
    assert_eq!(
        ledger.repository.get(&lapsed.id).await.unwrap().status,
        SubscriptionStatus::Expired
    );
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn second_live_subscription_is_rejected() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    ledger.create.handle(Ledger::january("alice")).await.unwrap();

    let result = ledger.create.handle(Ledger::january("alice")).await;

    assert_eq!(
        result,
        Err(SubscriptionError::DuplicateActiveSubscription(user("alice")))
    );
    assert_eq!(ledger.payment.authorize_count(), 1);
    assert_eq!(ledger.repository.len().await, 1);
}

#[tokio::test]
async fn lapsed_subscription_does_not_block_renewal() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    let old = ledger.create.handle(Ledger::january("alice")).await.unwrap();

    // Not swept yet
    ledger.clock.set(day(2024, 2, 2));
    let renewed = ledger
        .create
        .handle(CreateSubscriptionCommand {
            user_id: user("alice"),
            plan: PlanType::Premium,
            start_date: day(2024, 2, 2),
            end_date: Some(day(2024, 3, 2)),
        })
        .await
        .unwrap();

    assert_eq!(
        ledger.repository.get(&old.id).await.unwrap().status,
        SubscriptionStatus::Expired
    );
    assert_eq!(ledger.current_for("alice").await.unwrap().id, renewed.id);
}

#[tokio::test]
async fn declined_payment_persists_nothing() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    ledger.payment.fail_authorize(PaymentError::declined("card declined"));

    let result = ledger.create.handle(Ledger::january("alice")).await;

    assert!(matches!(result, Err(SubscriptionError::PaymentFailed { .. })));
    assert!(ledger.repository.is_empty().await);
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn owner_cancel_revokes_access_immediately() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    let created = ledger.create.handle(Ledger::january("alice")).await.unwrap();

    ledger.clock.set(day(2024, 1, 10));
    let cancelled = ledger
        .cancel
        .handle(CancelSubscriptionCommand {
            subscription_id: created.id,
            requester: user("alice"),
        })
        .await
        .unwrap();

    assert_eq!(cancelled.status, SubscriptionStatus::Inactive);
    assert!(ledger.current_for("alice").await.is_err());
    assert_eq!(ledger.payment.cancelled_ids(), vec![created.id]);
}

#[tokio::test]
async fn foreign_cancel_leaves_subscription_untouched() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    let created = ledger.create.handle(Ledger::january("alice")).await.unwrap();

    let result = ledger
        .cancel
        .handle(CancelSubscriptionCommand {
            subscription_id: created.id,
            requester: user("mallory"),
        })
        .await;

    assert_eq!(
        result,
        Err(SubscriptionError::not_owner(created.id, user("mallory")))
    );
    assert_eq!(
        ledger.repository.get(&created.id).await.unwrap().status,
        SubscriptionStatus::Active
    );
    assert!(ledger.payment.cancelled_ids().is_empty());
}

#[tokio::test]
async fn cancelled_subscription_is_not_swept() {
    let ledger = Ledger::starting_at(day(2024, 1, 1));
    let created = ledger.create.handle(Ledger::january("alice")).await.unwrap();
    ledger
        .cancel
        .handle(CancelSubscriptionCommand {
            subscription_id: created.id,
            requester: user("alice"),
        })
        .await
        .unwrap();

    ledger.clock.advance(Duration::days(60));
    let summary = ledger.sweep.handle().await.unwrap();

    assert!(summary.is_noop());
    assert_eq!(
        ledger.repository.get(&created.id).await.unwrap().status,
        SubscriptionStatus::Inactive
    );
}
