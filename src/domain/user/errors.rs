//! Account and login error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | EmailTaken | 409 |
//! | InvalidCredentials | 401 |
//! | InvalidToken | 401 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, UserId, ValidationError};

/// Errors from registration, login, token refresh and account upkeep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// No account with this id.
    NotFound(UserId),

    /// An account with this email already exists.
    EmailTaken(String),

    /// Unknown email or wrong password. Deliberately indistinguishable.
    InvalidCredentials,

    /// Presented token failed validation.
    InvalidToken,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl AccountError {
    pub fn not_found(id: UserId) -> Self {
        AccountError::NotFound(id)
    }

    pub fn email_taken(email: impl Into<String>) -> Self {
        AccountError::EmailTaken(email.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::NotFound(_) => ErrorCode::UserNotFound,
            AccountError::EmailTaken(_) => ErrorCode::EmailTaken,
            AccountError::InvalidCredentials => ErrorCode::Unauthorized,
            AccountError::InvalidToken => ErrorCode::InvalidToken,
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            AccountError::NotFound(id) => format!("User not found: {}", id),
            AccountError::EmailTaken(email) => format!("Email {} is already registered", email),
            AccountError::InvalidCredentials => "Invalid email or password".to_string(),
            AccountError::InvalidToken => "Invalid or expired token".to_string(),
            AccountError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AccountError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken | AuthError::MissingToken => AccountError::InvalidToken,
            AuthError::InsufficientPermissions => AccountError::InvalidCredentials,
            AuthError::SigningFailed(msg) => AccountError::Infrastructure(msg),
        }
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        AccountError::Infrastructure(err.to_string())
    }
}

impl From<AccountError> for DomainError {
    fn from(err: AccountError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
