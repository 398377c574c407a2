//! Entitlement rule for reading content.
//!
//! Owners always get in. Everyone else needs the subscription returned
//! by the ledger's current-subscription lookup, and that subscription
//! must still be active at the moment of the check. The rule is pure;
//! callers re-run it on every request.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionStatus};

use super::Content;

/// Why access was granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessGrant {
    Owner,
    Subscriber { subscription_id: SubscriptionId },
}

/// Why access was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessDeniedReason {
    /// Requester holds no current subscription.
    NoSubscription,

    /// The subscription was cancelled.
    SubscriptionInactive,

    /// The subscription's window has closed, swept or not.
    SubscriptionExpired,
}

impl AccessDeniedReason {
    /// Message suitable for showing to the requester.
    pub fn user_message(&self) -> &'static str {
        match self {
            AccessDeniedReason::NoSubscription => {
                "A subscription is required to view this content."
            }
            AccessDeniedReason::SubscriptionInactive => {
                "Your subscription has been cancelled. Subscribe again to view this content."
            }
            AccessDeniedReason::SubscriptionExpired => {
                "Your subscription has expired. Renew to view this content."
            }
        }
    }
}

impl std::fmt::Display for AccessDeniedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.user_message())
    }
}

/// Decides whether `requester` may read `content` at `now`.
///
/// `current` is whatever the subscription ledger reported for the
/// requester; it is re-checked here because the status flag alone is
/// not enough.
pub fn evaluate_access(
    content: &Content,
    requester: &UserId,
    current: Option<&Subscription>,
    now: Timestamp,
) -> Result<AccessGrant, AccessDeniedReason> {
    if content.is_owned_by(requester) {
        return Ok(AccessGrant::Owner);
    }

    let subscription = current.ok_or(AccessDeniedReason::NoSubscription)?;

    if !subscription.is_owned_by(requester) {
        return Err(AccessDeniedReason::NoSubscription);
    }

    if subscription.is_active_at(now) {
        return Ok(AccessGrant::Subscriber {
            subscription_id: subscription.id,
        });
    }

    match subscription.status {
        SubscriptionStatus::Inactive => Err(AccessDeniedReason::SubscriptionInactive),
        SubscriptionStatus::Active | SubscriptionStatus::Expired => {
            Err(AccessDeniedReason::SubscriptionExpired)
        }
    }
}
