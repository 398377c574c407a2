//! In-memory user repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// `UserRepository` held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    rows: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|u| u.email == user.email) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                format!("Email {} is already registered", user.email),
            ));
        }
        rows.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&user.id).ok_or_else(|| not_found(&user.id))?;
        row.name = user.name.clone();
        row.password_hash = user.password_hash.clone();
        row.updated_at = user.updated_at;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        match self.rows.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn user(email: &str) -> User {
        User::register(
            UserId::generate(),
            email,
            "Ann",
            "h1",
            Timestamp::from_ymd(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Update
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn update_persists_name_and_hash_only() {
        let repo = InMemoryUserRepository::new();
        let original = user("a@b.io");
        repo.save(&original).await.unwrap();

        let mut changed = original.clone();
        changed.name = "Annie".to_string();
        changed.password_hash = "h2".to_string();
        changed.email = "other@b.io".to_string();
        repo.update(&changed).await.unwrap();

        let stored = repo.find_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Annie");
        assert_eq!(stored.password_hash, "h2");
        assert_eq!(stored.email, "a@b.io");
    }

    #[tokio::test]
    async fn update_of_unknown_account_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.update(&user("a@b.io")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Delete
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn delete_frees_the_email() {
        let repo = InMemoryUserRepository::new();
        let first = user("a@b.io");
        repo.save(&first).await.unwrap();

        repo.delete(&first.id).await.unwrap();

        assert!(repo.find_by_id(&first.id).await.unwrap().is_none());
        repo.save(&user("a@b.io")).await.unwrap();
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let u = user("a@b.io");
        repo.save(&u).await.unwrap();
        repo.delete(&u.id).await.unwrap();

        let err = repo.delete(&u.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
