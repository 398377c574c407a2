//! Command and query handlers.
//!
//! Each handler takes its collaborators as `Arc<dyn Port>` at
//! construction and exposes a single `handle` method.

pub mod auth;
pub mod content;
pub mod subscription;

pub use auth::{
    ChangePasswordCommand, ChangePasswordHandler, DeleteAccountCommand, DeleteAccountHandler,
    LoginCommand, LoginHandler, LoginResult, RefreshTokenCommand, RefreshTokenHandler,
    RegisterCommand, RegisterHandler, UpdateProfileCommand, UpdateProfileHandler,
};
pub use content::{
    CreateContentCommand, CreateContentHandler, DeleteContentCommand, DeleteContentHandler,
    GetContentHandler, GetContentQuery, GetContentResult, ListOwnedContentHandler,
    ListOwnedContentQuery, UpdateContentCommand, UpdateContentHandler,
};
pub use subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CreateSubscriptionCommand,
    CreateSubscriptionHandler, DeleteSubscriptionCommand, DeleteSubscriptionHandler,
    GetCurrentSubscriptionHandler, GetCurrentSubscriptionQuery, SweepExpiredSubscriptionsHandler,
};
