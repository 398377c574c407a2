//! Token issuance and validation port.
//!
//! Tokens are opaque signed strings. Validation is a pure CPU check with
//! no I/O, so the trait is synchronous.
//!
//! # Revocation
//!
//! Tokens are stateless. Nothing here can invalidate a token before its
//! natural expiry.

use crate::domain::foundation::{AuthError, IdentityClaim, Role, TokenPair, UserId};

/// Issues, validates and refreshes signed identity tokens.
pub trait TokenService: Send + Sync {
    /// Signs a new token for `subject` valid from now for the configured lifetime.
    fn issue(&self, subject: &UserId, role: Role) -> Result<String, AuthError>;

    /// Verifies signature and expiry and returns the embedded claim.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidToken` for a bad signature, undecodable payload,
    /// a token used before its not-before time, or `now >= expires_at`.
    fn validate(&self, token: &str) -> Result<IdentityClaim, AuthError>;

    /// Validates `token` and issues a replacement for the same identity
    /// whose expiry is strictly later than the original's.
    fn refresh(&self, token: &str) -> Result<String, AuthError>;

    /// Access and refresh tokens for a fresh login.
    fn issue_pair(&self, subject: &UserId, role: Role) -> Result<TokenPair, AuthError> {
        let access_token = self.issue(subject, role)?;
        let refresh_token = self.issue(subject, role)?;
        let expires_at = self.validate(&access_token)?.expires_at;
        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at,
        })
    }
}
