//! Account and token handlers.

mod change_password;
mod delete_account;
mod login;
mod refresh_token;
mod register;
mod update_profile;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use delete_account::{DeleteAccountCommand, DeleteAccountHandler};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use refresh_token::{RefreshTokenCommand, RefreshTokenHandler};
pub use register::{RegisterCommand, RegisterHandler, MIN_PASSWORD_LENGTH};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
