//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HMAC secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366;

/// Token signing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for HS256 signing
    pub jwt_secret: SecretString,

    /// Lifetime of issued tokens in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    /// Token lifetime as a chrono Duration
    ///
    /// Out-of-range values are clamped; `validate` rejects them first.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS))
    }

    /// Validate authentication configuration
    ///
    /// Production requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort {
                min: MIN_PRODUCTION_SECRET_BYTES,
            });
        }
        if self.token_ttl_hours <= 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ValidationError::TokenTtlTooLong {
                max_hours: MAX_TOKEN_TTL_HOURS,
            });
        }
        Ok(())
    }
}

fn default_token_ttl_hours() -> i64 {
    24
}
