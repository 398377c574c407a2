//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - token signing and password hashing
//! - `clock` - wall clock and a manually driven clock
//! - `http` - axum authentication boundary
//! - `memory` - in-memory repositories
//! - `payment` - Stripe and a scripted gateway
//! - `postgres` - PostgreSQL repositories and migrations
//! - `storage` - local filesystem uploads

pub mod auth;
pub mod clock;
pub mod http;
pub mod memory;
pub mod payment;
pub mod postgres;
pub mod storage;

pub use auth::{Argon2PasswordHasher, JwtTokenAuthority};
pub use clock::{ManualClock, SystemClock};
pub use memory::{InMemoryContentRepository, InMemorySubscriptionRepository, InMemoryUserRepository};
pub use payment::{MockPaymentGateway, StripeGatewayConfig, StripePaymentGateway};
pub use postgres::{
    PostgresContentRepository, PostgresSubscriptionRepository, PostgresUserRepository,
};
pub use storage::LocalFileStorage;
