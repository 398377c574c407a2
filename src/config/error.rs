//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("JWT secret must be at least {min} bytes in production")]
    JwtSecretTooShort { min: usize },

    #[error("Token lifetime must be greater than zero")]
    InvalidTokenTtl,

    #[error("Token lifetime must not exceed {max_hours} hours")]
    TokenTtlTooLong { max_hours: i64 },

    #[error("Invalid Stripe API key format")]
    InvalidStripeKey,

    #[error("Sweep interval must be greater than zero")]
    InvalidSweepInterval,
}
