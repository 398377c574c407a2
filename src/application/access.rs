//! AccessAuthorizer - per-request entitlement check for content reads.

use std::sync::Arc;

use crate::domain::content::{evaluate_access, AccessGrant, Content, ContentError};
use crate::domain::foundation::UserId;
use crate::domain::subscription::SubscriptionError;
use crate::ports::Clock;

use super::handlers::subscription::{GetCurrentSubscriptionHandler, GetCurrentSubscriptionQuery};

/// Decides whether a requester may read a content item.
///
/// Nothing is cached: each call asks the ledger for the requester's
/// current subscription, so a cancellation or lapse takes effect on the
/// very next request.
pub struct AccessAuthorizer {
    current: Arc<GetCurrentSubscriptionHandler>,
    clock: Arc<dyn Clock>,
}

impl AccessAuthorizer {
    pub fn new(current: Arc<GetCurrentSubscriptionHandler>, clock: Arc<dyn Clock>) -> Self {
        Self { current, clock }
    }

    /// Grants the owner unconditionally, otherwise requires a current subscription.
    ///
    /// # Errors
    ///
    /// - `ContentError::Forbidden` with the denial reason
    /// - `ContentError::Infrastructure` if the ledger cannot be read
    pub async fn can_access(
        &self,
        content: &Content,
        requester: &UserId,
    ) -> Result<AccessGrant, ContentError> {
        if content.is_owned_by(requester) {
            return Ok(AccessGrant::Owner);
        }

        let current = match self
            .current
            .handle(GetCurrentSubscriptionQuery {
                user_id: requester.clone(),
            })
            .await
        {
            Ok(subscription) => Some(subscription),
            Err(SubscriptionError::NotFoundForUser(_)) => None,
            Err(e) => return Err(ContentError::infrastructure(e.to_string())),
        };

        evaluate_access(content, requester, current.as_ref(), self.clock.now()).map_err(|reason| {
            tracing::debug!(
                content_id = %content.id,
                requester = %requester,
                reason = ?reason,
                "Content access denied"
            );
            ContentError::forbidden(reason)
        })
    }
}
