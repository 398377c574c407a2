//! User account repository port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use async_trait::async_trait;

/// Repository port for account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new account.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if the (normalized) email is already registered
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Persist a changed name or password hash. Email and role are fixed.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account doesn't exist
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Lookup by normalized (trimmed, lowercase) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Remove an account. Its subscriptions and content go with it.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account doesn't exist
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
