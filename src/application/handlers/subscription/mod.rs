//! Subscription ledger handlers.

mod cancel_subscription;
mod create_subscription;
mod delete_subscription;
mod expire;
mod get_current_subscription;
mod sweep_expired_subscriptions;

pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use create_subscription::{CreateSubscriptionCommand, CreateSubscriptionHandler};
pub use delete_subscription::{DeleteSubscriptionCommand, DeleteSubscriptionHandler};
pub use get_current_subscription::{GetCurrentSubscriptionHandler, GetCurrentSubscriptionQuery};
pub use sweep_expired_subscriptions::SweepExpiredSubscriptionsHandler;
