//! RefreshTokenHandler - Trade a valid token for a fresh one.

use std::sync::Arc;

use crate::domain::user::AccountError;
use crate::ports::TokenService;

/// Command carrying the token to refresh.
#[derive(Debug, Clone)]
pub struct RefreshTokenCommand {
    pub token: String,
}

/// Handler for token refresh. There is no revocation list: any token
/// that still validates can be refreshed.
pub struct RefreshTokenHandler {
    tokens: Arc<dyn TokenService>,
}

impl RefreshTokenHandler {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    pub fn handle(&self, cmd: RefreshTokenCommand) -> Result<String, AccountError> {
        Ok(self.tokens.refresh(&cmd.token)?)
    }
}
