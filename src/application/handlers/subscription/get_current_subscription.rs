//! GetCurrentSubscriptionHandler - Query for a user's live subscription.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{Clock, SubscriptionRepository};

/// Query for the subscription that currently entitles a user.
#[derive(Debug, Clone)]
pub struct GetCurrentSubscriptionQuery {
    pub user_id: UserId,
}

/// Returns the latest subscription that is both stored as Active and
/// inside its window at the clock's `now`. A stale Active row that the
/// sweep has not reached yet is reported as not found.
pub struct GetCurrentSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    clock: Arc<dyn Clock>,
}

impl GetCurrentSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        query: GetCurrentSubscriptionQuery,
    ) -> Result<Subscription, SubscriptionError> {
        let now = self.clock.now();

        self.repository
            .find_latest_active_by_user(&query.user_id)
            .await?
            .filter(|sub| sub.is_active_at(now))
            .ok_or_else(|| SubscriptionError::not_found_for_user(query.user_id))
    }
}
