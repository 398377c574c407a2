//! User account entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

/// A registered account.
///
/// `password_hash` is an encoded hash string from the `PasswordHasher`
/// port; plaintext passwords never reach this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Creates a new account with the default `user` role.
    pub fn register(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let email = normalize_email(&email.into())?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let password_hash = password_hash.into();
        if password_hash.is_empty() {
            return Err(ValidationError::empty_field("password_hash"));
        }

        Ok(Self {
            id,
            email,
            password_hash,
            name,
            role: Role::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Changes the display name.
    pub fn rename(&mut self, name: impl Into<String>, now: Timestamp) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        self.name = name;
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the stored hash after a password change.
    pub fn set_password_hash(
        &mut self,
        password_hash: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        let password_hash = password_hash.into();
        if password_hash.is_empty() {
            return Err(ValidationError::empty_field("password_hash"));
        }
        self.password_hash = password_hash;
        self.updated_at = now;
        Ok(())
    }
}

/// Trims and lowercases an email, rejecting obviously malformed input.
pub(crate) fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_ascii_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ValidationError::invalid_format(
            "email",
            "expected an address like name@example.com",
        )),
    }
}
