//! ExpirySweeper - Background runner for the expiry sweep.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 1h | Time between sweep runs |
//!
//! ## Graceful Shutdown
//!
//! The runner listens on a watch channel and stops between runs. A run
//! in progress is always finished first, and runs never overlap because
//! the loop awaits each one before the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::domain::subscription::{SubscriptionError, SweepSummary};

use super::handlers::subscription::SweepExpiredSubscriptionsHandler;

/// Configuration for the ExpirySweeper.
#[derive(Debug, Clone)]
pub struct ExpirySweeperConfig {
    pub interval: Duration,
}

impl Default for ExpirySweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
        }
    }
}

impl ExpirySweeperConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Drives `SweepExpiredSubscriptionsHandler` on a fixed interval.
pub struct ExpirySweeper {
    handler: Arc<SweepExpiredSubscriptionsHandler>,
    config: ExpirySweeperConfig,
}

impl ExpirySweeper {
    pub fn new(handler: Arc<SweepExpiredSubscriptionsHandler>) -> Self {
        Self {
            handler,
            config: ExpirySweeperConfig::default(),
        }
    }

    pub fn with_config(
        handler: Arc<SweepExpiredSubscriptionsHandler>,
        config: ExpirySweeperConfig,
    ) -> Self {
        Self { handler, config }
    }

    /// Run sweeps until the shutdown signal is received.
    ///
    /// The first sweep runs immediately. A run that cannot list its
    /// candidates is logged and the loop keeps going.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            "Expiry sweeper started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Expiry sweeper stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(error = %e, "Expiry sweep failed");
                    }
                }
            }
        }
    }

    /// Run exactly one sweep.
    pub async fn run_once(&self) -> Result<SweepSummary, SubscriptionError> {
        self.handler.handle().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::memory::InMemorySubscriptionRepository;
    use crate::adapters::payment::MockPaymentGateway;
    use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};
    use crate::domain::subscription::{PlanType, Subscription, SubscriptionStatus};
    use crate::ports::SubscriptionRepository;

    fn day(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_ymd(y, m, d).unwrap()
    }

    async fn setup() -> (ExpirySweeper, InMemorySubscriptionRepository, Subscription) {
        let repository = InMemorySubscriptionRepository::new();
        let sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new("alice").unwrap(),
            PlanType::Basic,
            day(2024, 1, 1),
            Some(day(2024, 2, 1)),
            day(2024, 1, 1),
        )
        .unwrap();
        repository.save(&sub).await.unwrap();

        let handler = SweepExpiredSubscriptionsHandler::new(
            Arc::new(repository.clone()),
            Arc::new(MockPaymentGateway::new()),
            Arc::new(ManualClock::new(day(2024, 3, 1))),
        );
        let sweeper = ExpirySweeper::with_config(
            Arc::new(handler),
            ExpirySweeperConfig::default().with_interval(Duration::from_millis(10)),
        );
        (sweeper, repository, sub)
    }

    #[test]
    fn default_interval_is_one_hour() {
        assert_eq!(
            ExpirySweeperConfig::default().interval,
            Duration::from_secs(3600)
        );
    }

    #[tokio::test]
    async fn run_once_returns_summary() {
        let (sweeper, _, _) = setup().await;

        let summary = sweeper.run_once().await.unwrap();
        assert_eq!(summary.expired, 1);

        let again = sweeper.run_once().await.unwrap();
        assert!(again.is_noop());
    }

    #[tokio::test]
    async fn run_sweeps_then_stops_on_shutdown() {
        let (sweeper, repository, sub) = setup().await;
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { sweeper.run(rx).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();

        assert_eq!(
            repository.get(&sub.id).await.unwrap().status,
            SubscriptionStatus::Expired
        );
    }

    #[tokio::test]
    async fn dropped_sender_stops_runner() {
        let (sweeper, _, _) = setup().await;
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { sweeper.run(rx).await });
        drop(tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
