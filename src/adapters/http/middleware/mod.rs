//! HTTP middleware for axum.
//!
//! - `auth` - Authentication middleware, extractors, and role checks

pub mod auth;

pub use auth::{auth_middleware, require_role, AuthRejection, AuthState, RequireAuth};
