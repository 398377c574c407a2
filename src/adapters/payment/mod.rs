//! Payment gateway adapters.
//!
//! - `StripePaymentGateway` - live Stripe REST integration
//! - `MockPaymentGateway` - scripted gateway for tests

mod mock;
mod stripe;

pub use mock::{GatewayCall, MockPaymentGateway};
pub use stripe::{StripeGatewayConfig, StripePaymentGateway};
