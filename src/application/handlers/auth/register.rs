//! RegisterHandler - Open a new account.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, UserId, ValidationError};
use crate::domain::user::{normalize_email, AccountError, User};
use crate::ports::{Clock, PasswordHasher, UserRepository};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Command to register an account.
#[derive(Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// Handler for registration. New accounts always get the `user` role.
pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl RegisterHandler {
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

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<User, AccountError> {
        if cmd.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::invalid_format(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            )
            .into());
        }

        let email = normalize_email(&cmd.email)?;
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountError::email_taken(email));
        }

        let password_hash = self.hasher.hash(&cmd.password)?;
        let user = User::register(
            UserId::generate(),
            email,
            cmd.name,
            password_hash,
            self.clock.now(),
        )?;

        self.users.save(&user).await.map_err(|e| match e.code {
            ErrorCode::EmailTaken => AccountError::email_taken(user.email.clone()),
            _ => e.into(),
        })?;

        tracing::info!(user_id = %user.id, "Account registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::{DomainError, Role, Timestamp};

    /// Reversible stand-in so tests stay fast.
    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("plain:{}", password))
        }

        fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
            Ok(password_hash == format!("plain:{}", password))
        }
    }

    fn handler(users: InMemoryUserRepository) -> RegisterHandler {
        RegisterHandler::new(
            Arc::new(users),
            Arc::new(PlainHasher),
            Arc::new(ManualClock::new(Timestamp::from_ymd(2024, 1, 1).unwrap())),
        )
    }

    fn command(email: &str) -> RegisterCommand {
        RegisterCommand {
            email: email.to_string(),
            password: "correct horse".to_string(),
            name: "Ann".to_string(),
        }
    }

    #[tokio::test]
    async fn registers_user_with_hashed_password() {
        let users = InMemoryUserRepository::new();

        let user = handler(users.clone())
            .handle(command("  Ann@Example.COM "))
            .await
            .unwrap();

        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.password_hash, "plain:correct horse");
        assert!(users.find_by_id(&user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let users = InMemoryUserRepository::new();
        let handler = handler(users);
        handler.handle(command("ann@example.com")).await.unwrap();

        let err = handler.handle(command("ANN@example.com")).await.unwrap_err();

        assert_eq!(err, AccountError::email_taken("ann@example.com"));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let mut cmd = command("ann@example.com");
        cmd.password = "short".to_string();

        let err = handler(InMemoryUserRepository::new())
            .handle(cmd)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AccountError::ValidationFailed { ref field, .. } if field == "password"
        ));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let err = handler(InMemoryUserRepository::new())
            .handle(command("not-an-email"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AccountError::ValidationFailed { ref field, .. } if field == "email"
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", command("ann@example.com"));
        assert!(!rendered.contains("correct horse"));
    }
}
