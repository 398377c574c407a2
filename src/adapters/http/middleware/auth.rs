//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` validates Bearer tokens and injects the `IdentityClaim`
//! - `RequireAuth` extractor rejects requests without a claim
//! - `require_role` turns a role mismatch into a 403
//!
//! ```text
//! Request → auth_middleware → injects IdentityClaim into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! # Example
//!
//! ```ignore
//! let tokens: Arc<dyn TokenService> = Arc::new(authority);
//!
//! let app = Router::new()
//!     .route("/api/admin/subscriptions/:id", delete(delete_handler))
//!     .layer(middleware::from_fn_with_state(tokens.clone(), auth_middleware));
//!
//! async fn delete_handler(RequireAuth(claim): RequireAuth) -> Result<StatusCode, AuthRejection> {
//!     require_role(&claim, Role::Admin)?;
//!     Ok(StatusCode::NO_CONTENT)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{IdentityClaim, Role};
use crate::ports::TokenService;

/// Auth middleware state - wraps the token service.
pub type AuthState = Arc<dyn TokenService>;

/// Authentication middleware that validates Bearer tokens.
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates it with the `TokenService` port
/// 3. On success, injects `IdentityClaim` into request extensions
/// 4. On missing token, continues without injecting
/// 5. On invalid or expired token, returns 401 Unauthorized
pub async fn auth_middleware(
    State(tokens): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match tokens.validate(token) {
            Ok(claim) => {
                request.extensions_mut().insert(claim);
                next.run(request).await
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                AuthRejection::InvalidToken.into_response()
            }
        },
        // Handlers use RequireAuth to enforce authentication
        None => next.run(request).await,
    }
}

/// Extractor that requires authentication.
///
/// Returns 401 when the middleware did not inject a claim.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub IdentityClaim);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<IdentityClaim>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Fails with `AuthRejection::InsufficientRole` unless the claim carries `role`.
pub fn require_role(claim: &IdentityClaim, role: Role) -> Result<(), AuthRejection> {
    if claim.has_role(role) {
        Ok(())
    } else {
        tracing::warn!(
            subject_id = %claim.subject_id,
            required = %role,
            actual = %claim.role,
            "Role check failed"
        );
        Err(AuthRejection::InsufficientRole(role))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No token was provided.
    Unauthenticated,

    /// Token failed signature, shape, or expiry checks.
    InvalidToken,

    /// Authenticated, but without the required role.
    InsufficientRole(Role),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
                "UNAUTHENTICATED",
            ),
            AuthRejection::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
                "INVALID_TOKEN",
            ),
            AuthRejection::InsufficientRole(role) => (
                StatusCode::FORBIDDEN,
                format!("Requires role: {}", role),
                "FORBIDDEN",
            ),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": code
            })),
        )
            .into_response()
    }
}
