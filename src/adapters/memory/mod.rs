//! In-memory repository adapters for tests and local runs.

mod content_repository;
mod subscription_repository;
mod user_repository;

pub use content_repository::InMemoryContentRepository;
pub use subscription_repository::InMemorySubscriptionRepository;
pub use user_repository::InMemoryUserRepository;
