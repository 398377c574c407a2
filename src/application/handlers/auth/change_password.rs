//! ChangePasswordHandler - Replace an account's password.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, UserId, ValidationError};
use crate::domain::user::AccountError;
use crate::ports::{Clock, PasswordHasher, UserRepository};

use super::register::MIN_PASSWORD_LENGTH;

/// Command to change a password. The current one must be presented.
#[derive(Clone)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordCommand")
            .field("user_id", &self.user_id)
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

/// Handler for password changes. Tokens already issued stay valid until they expire.
pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl ChangePasswordHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), AccountError> {
        if cmd.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::invalid_format(
                "new_password",
                format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            )
            .into());
        }

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| AccountError::not_found(cmd.user_id.clone()))?;

        if !self.hasher.verify(&cmd.current_password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Password change with wrong current password");
            return Err(AccountError::InvalidCredentials);
        }

        let password_hash = self.hasher.hash(&cmd.new_password)?;
        user.set_password_hash(password_hash, self.clock.now())?;

        self.users.update(&user).await.map_err(|e| match e.code {
            ErrorCode::UserNotFound => AccountError::not_found(user.id.clone()),
            _ => e.into(),
        })?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
