//! DeleteAccountHandler - Remove an account along with everything it owns.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::user::AccountError;
use crate::ports::{ContentRepository, FileStorage, UserRepository};

/// Command to delete an account.
#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub user_id: UserId,
}

/// Deletes the account row, then the owner's content records and stored
/// files. Subscription rows are removed with the account. A file that
/// cannot be removed is logged and left behind.
pub struct DeleteAccountHandler {
    users: Arc<dyn UserRepository>,
    contents: Arc<dyn ContentRepository>,
    storage: Arc<dyn FileStorage>,
}

impl DeleteAccountHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        contents: Arc<dyn ContentRepository>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            users,
            contents,
            storage,
        }
    }

    pub async fn handle(&self, cmd: DeleteAccountCommand) -> Result<(), AccountError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| AccountError::not_found(cmd.user_id.clone()))?;

        let owned = self.contents.find_by_owner(&user.id).await?;

        self.users.delete(&user.id).await.map_err(|e| match e.code {
            ErrorCode::UserNotFound => AccountError::not_found(user.id.clone()),
            _ => e.into(),
        })?;

        for content in &owned {
            // Postgres has usually cascaded the row away already.
            if let Err(e) = self.contents.delete(&content.id).await {
                if e.code != ErrorCode::ContentNotFound {
                    tracing::warn!(content_id = %content.id, error = %e, "Content row not removed");
                }
            }
            if let Err(e) = self.storage.delete(&content.file_path).await {
                tracing::warn!(
                    content_id = %content.id,
                    path = %content.file_path,
                    error = %e,
                    "Account deleted but stored file was not removed"
                );
            }
        }

        tracing::info!(user_id = %user.id, content_items = owned.len(), "Account deleted");
        Ok(())
    }
}
