//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: SecretString,

    /// Stripe API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Stripe price ID for the basic plan
    #[serde(default = "default_basic_price_id")]
    pub basic_price_id: String,

    /// Stripe price ID for the premium plan
    #[serde(default = "default_premium_price_id")]
    pub premium_price_id: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.stripe_api_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if !key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if self.basic_price_id.is_empty() || self.premium_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__*_PRICE_ID"));
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_basic_price_id() -> String {
    "price_basic_monthly".to_string()
}

fn default_premium_price_id() -> String {
    "price_premium_monthly".to_string()
}
