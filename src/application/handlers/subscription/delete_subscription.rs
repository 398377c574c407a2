//! DeleteSubscriptionHandler - Administrative physical delete.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, Role, SubscriptionId};
use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionRepository;

/// Command to remove a subscription row.
#[derive(Debug, Clone)]
pub struct DeleteSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub actor_role: Role,
}

/// Handler for administrative deletes. Only `admin` may delete; the
/// provider side is not touched.
pub struct DeleteSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl DeleteSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteSubscriptionCommand) -> Result<(), SubscriptionError> {
        if cmd.actor_role != Role::Admin {
            return Err(SubscriptionError::forbidden(
                "only administrators may delete subscriptions",
            ));
        }

        self.repository
            .delete(&cmd.subscription_id)
            .await
            .map_err(|e| match e.code {
                ErrorCode::SubscriptionNotFound => {
                    SubscriptionError::not_found(cmd.subscription_id)
                }
                _ => e.into(),
            })?;

        tracing::info!(subscription_id = %cmd.subscription_id, "Subscription deleted by admin");
        Ok(())
    }
}
