//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `SubscriptionRepository`, `ContentRepository`, `UserRepository`
//!
//! ## External systems
//!
//! - `PaymentGateway` - charge and cancel with the payment provider
//! - `FileStorage` - upload and delete content files
//!
//! ## Security and time
//!
//! - `TokenService` - signed identity tokens
//! - `PasswordHasher` - one-way password hashing
//! - `Clock` - current time

mod clock;
mod content_repository;
mod file_storage;
mod password_hasher;
mod payment_gateway;
mod subscription_repository;
mod token_service;
mod user_repository;

pub use clock::Clock;
pub use content_repository::ContentRepository;
pub use file_storage::{FileStorage, StorageError, StoredFile};
pub use password_hasher::PasswordHasher;
pub use payment_gateway::{PaymentError, PaymentErrorCode, PaymentGateway};
pub use subscription_repository::SubscriptionRepository;
pub use token_service::TokenService;
pub use user_repository::UserRepository;
