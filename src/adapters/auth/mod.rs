//! Authentication adapters.
//!
//! - `JwtTokenAuthority` - HS256 `TokenService`
//! - `Argon2PasswordHasher` - `PasswordHasher`

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::JwtTokenAuthority;
