//! Subscription aggregate entity.
//!
//! A subscription records that a user paid for a plan over a window of
//! time. The stored `status` alone never proves entitlement: an Active
//! row whose `end_date` has passed is stale until the sweep demotes it,
//! so every entitlement question goes through `is_active_at`.
//!
//! # Invariants
//!
//! - `end_date`, when present, is not before `start_date`
//! - New subscriptions start Active
//! - Status changes follow `SubscriptionStatus` transitions only

use crate::domain::foundation::{
    DomainError, ErrorCode, StateMachine, SubscriptionId, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};

use super::{PlanType, SubscriptionStatus};

/// A user's subscription to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan: PlanType,
    pub status: SubscriptionStatus,
    pub start_date: Timestamp,
    /// Open-ended when `None`.
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Creates a new Active subscription.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` on `end_date` if it falls
    /// before `start_date`.
    pub fn create(
        id: SubscriptionId,
        user_id: UserId,
        plan: PlanType,
        start_date: Timestamp,
        end_date: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        if let Some(end) = end_date {
            if end.is_before(&start_date) {
                return Err(ValidationError::invalid_format(
                    "end_date",
                    format!("end date {} is before start date {}", end, start_date),
                ));
            }
        }

        Ok(Self {
            id,
            user_id,
            plan,
            status: SubscriptionStatus::Active,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// True entitlement: status is Active and the window is still open.
    ///
    /// The window is open while `end_date` is unset or strictly after `now`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.status == SubscriptionStatus::Active && !self.window_closed_at(now)
    }

    /// True when the sweep should demote this subscription at `now`.
    pub fn is_due_for_expiry(&self, now: Timestamp) -> bool {
        self.status == SubscriptionStatus::Active && self.window_closed_at(now)
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Owner cancellation: Active -> Inactive.
    pub fn cancel(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(SubscriptionStatus::Inactive, now)
    }

    /// Sweep demotion: Active -> Expired.
    pub fn expire(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(SubscriptionStatus::Expired, now)
    }

    fn window_closed_at(&self, now: Timestamp) -> bool {
        self.end_date.map_or(false, |end| end <= now)
    }

    fn transition_to(
        &mut self,
        target: SubscriptionStatus,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition subscription from {} to {}",
                    self.status, target
                ),
            )
        })?;
        self.updated_at = now;
        Ok(())
    }
}
