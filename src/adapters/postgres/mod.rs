//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSubscriptionRepository` - subscription ledger rows
//! - `PostgresContentRepository` - content metadata (files live in `FileStorage`)
//! - `PostgresUserRepository` - accounts
//! - `run_migrations` - applies the embedded schema

mod content_repository;
mod migrations;
mod subscription_repository;
mod user_repository;

pub use content_repository::PostgresContentRepository;
pub use migrations::run_migrations;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use user_repository::PostgresUserRepository;
