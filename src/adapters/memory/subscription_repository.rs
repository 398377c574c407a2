//! In-memory subscription repository.
//!
//! Enforces the same one-Active-row-per-user rule as the database's
//! partial unique index. Saves and status updates can be made to fail on
//! demand to exercise partial-failure paths.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

#[derive(Debug, Default)]
struct State {
    rows: HashMap<SubscriptionId, Subscription>,
    failing_updates: HashSet<SubscriptionId>,
    fail_all_updates: bool,
    fail_saves: bool,
}

/// `SubscriptionRepository` held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionRepository {
    state: Arc<RwLock<State>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `update_status` fail for one subscription.
    pub async fn fail_status_update_for(&self, id: SubscriptionId) {
        self.state.write().await.failing_updates.insert(id);
    }

    /// Make every `update_status` call fail.
    pub async fn fail_all_status_updates(&self, fail: bool) {
        self.state.write().await.fail_all_updates = fail;
    }

    /// Make every `save` call fail with a database error.
    pub async fn fail_saves(&self, fail: bool) {
        self.state.write().await.fail_saves = fail;
    }

    /// Snapshot of a stored row, bypassing the port.
    pub async fn get(&self, id: &SubscriptionId) -> Option<Subscription> {
        self.state.read().await.rows.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut state = self.state.write().await;

        if state.fail_saves {
            return Err(DomainError::database("Simulated save failure"));
        }

        if subscription.status == SubscriptionStatus::Active {
            let clash = state.rows.values().any(|row| {
                row.user_id == subscription.user_id && row.status == SubscriptionStatus::Active
            });
            if clash {
                return Err(DomainError::new(
                    ErrorCode::SubscriptionExists,
                    format!("User {} already has an active subscription", subscription.user_id),
                ));
            }
        }

        state.rows.insert(subscription.id, subscription.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: &SubscriptionId,
        status: SubscriptionStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;

        if state.fail_all_updates || state.failing_updates.contains(id) {
            return Err(DomainError::database("Simulated status update failure"));
        }

        let row = state.rows.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", id),
            )
        })?;
        row.status = status;
        row.updated_at = updated_at;
        Ok(())
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.state.read().await.rows.get(id).cloned())
    }

    async fn find_latest_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|row| &row.user_id == user_id && row.status == SubscriptionStatus::Active)
            .max_by_key(|row| row.created_at)
            .cloned())
    }

    async fn list_expired(&self, as_of: Timestamp) -> Result<Vec<Subscription>, DomainError> {
        let state = self.state.read().await;
        let mut due: Vec<Subscription> = state
            .rows
            .values()
            .filter(|row| row.is_due_for_expiry(as_of))
            .cloned()
            .collect();
        due.sort_by_key(|row| row.end_date);
        Ok(due)
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError> {
        match self.state.write().await.rows.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", id),
            )),
        }
    }
}
