//! Identity types for the domain layer.
//!
//! An `IdentityClaim` is what a bearer token proves about its holder.
//! It is produced by the `TokenService` port and consumed by the access
//! rules; nothing here depends on a particular token format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{Timestamp, UserId, ValidationError};

/// Account role carried inside every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// The decoded payload of a signed token.
///
/// Immutable: a claim is fully determined by the token it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub subject_id: UserId,
    pub role: Role,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl IdentityClaim {
    /// Expired once `now` reaches `expires_at`. No skew allowance.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Access and refresh tokens handed out at login.
///
/// Both strings come from the same issuance primitive and are not
/// distinguishable by their claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Bad signature, undecodable payload, not yet valid, or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// No bearer token was presented.
    #[error("Missing bearer token")]
    MissingToken,

    /// Token is valid but its role does not permit the action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The token could not be produced.
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

impl AuthError {
    pub fn signing_failed(message: impl Into<String>) -> Self {
        Self::SigningFailed(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim_expiring_at(expires_at: Timestamp) -> IdentityClaim {
        IdentityClaim {
            subject_id: UserId::new("user-1").unwrap(),
            role: Role::User,
            issued_at: expires_at.add_days(-1),
            expires_at,
        }
    }

    #[test]
    fn role_parses_known_values() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn role_defaults_to_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn claim_is_expired_exactly_at_expiry() {
        let exp = Timestamp::from_ymd(2024, 1, 2).unwrap();
        let claim = claim_expiring_at(exp);

        assert!(!claim.is_expired_at(exp.plus_millis(-1)));
        assert!(claim.is_expired_at(exp));
        assert!(claim.is_expired_at(exp.plus_secs(1)));
    }

    #[test]
    fn invalid_token_requires_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
    }
}
