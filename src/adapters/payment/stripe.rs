//! Stripe payment gateway.
//!
//! Implements `PaymentGateway` against the Stripe REST API with form
//! encoded requests and basic auth on the secret key.
//!
//! - `authorize` finds the customer tagged `metadata[user_id]` (creating
//!   one if needed) and opens a subscription on the plan's price,
//!   tagged with the local subscription id.
//! - `cancel` looks the Stripe subscription up by that tag and sets
//!   `cancel_at_period_end=true`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::PlanType;
use crate::ports::{PaymentError, PaymentErrorCode, PaymentGateway};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeGatewayConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    basic_price_id: String,
    premium_price_id: String,
}

impl StripeGatewayConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: "https://api.stripe.com".to_string(),
            basic_price_id: "price_basic_monthly".to_string(),
            premium_price_id: "price_premium_monthly".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_price_ids(mut self, basic: impl Into<String>, premium: impl Into<String>) -> Self {
        self.basic_price_id = basic.into();
        self.premium_price_id = premium.into();
        self
    }

    fn price_id(&self, plan: PlanType) -> &str {
        match plan {
            PlanType::Basic => &self.basic_price_id,
            PlanType::Premium => &self.premium_price_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeSearchResult {
    data: Vec<StripeObject>,
}

/// `PaymentGateway` backed by Stripe.
pub struct StripePaymentGateway {
    config: StripeGatewayConfig,
    http_client: reqwest::Client,
}

impl StripePaymentGateway {
    pub fn new(config: StripeGatewayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    async fn search(&self, resource: &str, query: String) -> Result<Option<String>, PaymentError> {
        let response = self
            .http_client
            .get(self.url(&format!("/v1/{}/search", resource)))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .query(&[("query", query), ("limit", "1".to_string())])
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let result: StripeSearchResult = parse_response(response, resource).await?;
        Ok(result.data.into_iter().next().map(|obj| obj.id))
    }

    async fn post_form(
        &self,
        path: &str,
        params: &[(&str, String)],
        idempotency_key: Option<String>,
    ) -> Result<StripeObject, PaymentError> {
        let mut request = self
            .http_client
            .post(self.url(path))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(params);
        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        parse_response(response, path).await
    }

    async fn find_or_create_customer(&self, user_id: &UserId) -> Result<String, PaymentError> {
        if let Some(id) = self
            .search("customers", metadata_query("user_id", user_id.as_str()))
            .await?
        {
            return Ok(id);
        }

        tracing::info!(user_id = %user_id, "Creating Stripe customer");
        let customer = self
            .post_form(
                "/v1/customers",
                &[("metadata[user_id]", user_id.to_string())],
                Some(format!("customer-{}", user_id)),
            )
            .await?;
        Ok(customer.id)
    }
}

/// Stripe search query matching one metadata key. Backslashes and quotes
/// in the value are escaped, backslashes first.
fn metadata_query(key: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("metadata['{}']:'{}'", key, escaped)
}

async fn parse_response<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, PaymentError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, error = %error_text, context, "Stripe request failed");
        let code = if status == reqwest::StatusCode::PAYMENT_REQUIRED {
            PaymentErrorCode::Declined
        } else if status == reqwest::StatusCode::NOT_FOUND {
            PaymentErrorCode::NotFound
        } else {
            PaymentErrorCode::ProviderError
        };
        return Err(PaymentError::new(
            code,
            format!("Stripe API error: {}", error_text),
        ));
    }

    response.json().await.map_err(|e| {
        PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
    })
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    async fn authorize(
        &self,
        subscription_id: &SubscriptionId,
        user_id: &UserId,
        plan: PlanType,
    ) -> Result<(), PaymentError> {
        let customer_id = self.find_or_create_customer(user_id).await?;

        let params = [
            ("customer", customer_id),
            ("items[0][price]", self.config.price_id(plan).to_string()),
            ("metadata[subscription_id]", subscription_id.to_string()),
            ("metadata[user_id]", user_id.to_string()),
        ];
        let created = self
            .post_form(
                "/v1/subscriptions",
                &params,
                Some(format!("subscription-{}", subscription_id)),
            )
            .await?;

        tracing::info!(
            subscription_id = %subscription_id,
            stripe_subscription_id = %created.id,
            plan = %plan,
            "Stripe subscription created"
        );
        Ok(())
    }

    async fn cancel(&self, subscription_id: &SubscriptionId) -> Result<(), PaymentError> {
        let stripe_id = self
            .search(
                "subscriptions",
                metadata_query("subscription_id", &subscription_id.to_string()),
            )
            .await?
            .ok_or_else(|| PaymentError::not_found("Subscription"))?;

        self.post_form(
            &format!("/v1/subscriptions/{}", stripe_id),
            &[("cancel_at_period_end", "true".to_string())],
            None,
        )
        .await?;

        tracing::info!(
            subscription_id = %subscription_id,
            stripe_subscription_id = %stripe_id,
            "Stripe subscription set to cancel at period end"
        );
        Ok(())
    }
}
