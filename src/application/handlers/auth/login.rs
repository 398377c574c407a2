//! LoginHandler - Exchange credentials for a token pair.

use std::sync::Arc;

use crate::domain::foundation::TokenPair;
use crate::domain::user::{normalize_email, AccountError, User};
use crate::ports::{PasswordHasher, TokenService, UserRepository};

/// Command to log in.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub tokens: TokenPair,
}

/// Handler for login.
///
/// Unknown emails and wrong passwords both yield `InvalidCredentials`.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        let email = normalize_email(&cmd.email).map_err(|_| AccountError::InvalidCredentials)?;

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(AccountError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(&cmd.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let tokens = self.tokens.issue_pair(&user.id, user.role)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResult { user, tokens })
    }
}
