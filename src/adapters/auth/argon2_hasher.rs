//! Argon2id password hashing.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// `PasswordHasher` backed by Argon2id with default parameters.
///
/// Hashes are PHC strings (`$argon2id$v=19$...`) carrying their own salt.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(password_hash).map_err(|e| {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            DomainError::new(ErrorCode::InternalError, "Stored password hash is malformed")
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
