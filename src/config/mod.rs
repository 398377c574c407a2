//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file when
//! present) with the `KIMIYOMI` prefix. Nested values use `__` as the
//! separator, so `KIMIYOMI__AUTH__JWT_SECRET` becomes `auth.jwt_secret`.
//!
//! # Example
//!
//! ```no_run
//! use kimiyomi::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;
mod storage;
mod sweeper;

pub use auth::{AuthConfig, MAX_TOKEN_TTL_HOURS, MIN_PRODUCTION_SECRET_BYTES};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;
pub use sweeper::SweeperConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// Token signing
    pub auth: AuthConfig,

    /// PostgreSQL connection
    pub database: DatabaseConfig,

    /// Stripe
    pub payment: PaymentConfig,

    /// Uploaded file store
    #[serde(default)]
    pub storage: StorageConfig,

    /// Expiry sweeper schedule
    #[serde(default)]
    pub sweeper: SweeperConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("KIMIYOMI")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.database.validate()?;
        self.payment.validate()?;
        self.storage.validate()?;
        self.sweeper.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
