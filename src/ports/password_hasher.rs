//! Password hashing port.

use crate::domain::foundation::DomainError;

/// One-way password hashing.
///
/// `hash` output is self-describing (algorithm, parameters, salt), so
/// `verify` needs nothing but the stored string.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// `Ok(false)` for a wrong password; `Err` only for a corrupt hash.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError>;
}
