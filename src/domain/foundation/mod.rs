//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, identity types, and error types
//! used by every other domain module.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, IdentityClaim, Role, TokenPair};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ContentId, SubscriptionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
