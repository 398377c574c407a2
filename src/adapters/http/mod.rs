//! HTTP adapters.
//!
//! Only the authentication boundary lives here; routes are composed by
//! the embedding service.

pub mod middleware;

pub use middleware::{auth_middleware, require_role, AuthRejection, AuthState, RequireAuth};
