//! User accounts.
//!
//! Accounts hold login credentials and the role that ends up in every
//! token issued for them.

mod account;
mod errors;

pub use account::User;
pub(crate) use account::normalize_email;
pub use errors::AccountError;
