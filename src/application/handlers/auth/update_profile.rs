//! UpdateProfileHandler - Change an account's display name.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::user::{AccountError, User};
use crate::ports::{Clock, UserRepository};

/// Command to rename an account.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub name: String,
}

/// Handler for profile changes.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, AccountError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| AccountError::not_found(cmd.user_id.clone()))?;

        user.rename(cmd.name, self.clock.now())?;

        self.users.update(&user).await.map_err(|e| match e.code {
            ErrorCode::UserNotFound => AccountError::not_found(user.id.clone()),
            _ => e.into(),
        })?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }
}
