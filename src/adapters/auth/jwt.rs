//! HS256 token authority.
//!
//! Implements `TokenService` with `jsonwebtoken`. The signing secret is
//! injected at construction and never leaves this type.
//!
//! # Claims
//!
//! Tokens carry the identity (`sub`, `role`), millisecond-precision
//! `issued_at`/`expires_at`, and the registered `iat`/`nbf`/`exp`
//! fields in whole seconds for interoperability.
//!
//! # Expiry
//!
//! The library's own `exp` check is disabled. Expiry is decided against
//! the injected `Clock` with `now >= expires_at` and no leeway, so
//! simulated time applies to tokens the same way it applies to
//! subscriptions.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, IdentityClaim, Role, Timestamp, UserId};
use crate::ports::{Clock, TokenService};

/// Wire payload of a signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    role: Role,
    issued_at: Timestamp,
    expires_at: Timestamp,
    iat: i64,
    nbf: i64,
    exp: i64,
}

/// Signs and verifies identity tokens with a process-wide HMAC secret.
pub struct JwtTokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenAuthority {
    /// Creates an authority issuing tokens valid for `lifetime`.
    pub fn new(secret: &SecretString, lifetime: Duration, clock: Arc<dyn Clock>) -> Self {
        let key = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            validation,
            lifetime,
            clock,
        }
    }

    /// Configured token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// `start + lifetime`, or `SigningFailed` if that leaves chrono's range.
    fn expiry_from(&self, start: Timestamp) -> Result<Timestamp, AuthError> {
        start
            .as_datetime()
            .checked_add_signed(self.lifetime)
            .map(Timestamp::from_datetime)
            .ok_or_else(|| {
                tracing::error!(
                    lifetime_secs = self.lifetime.num_seconds(),
                    "Token lifetime overflows"
                );
                AuthError::signing_failed("token lifetime out of range")
            })
    }

    fn sign(
        &self,
        subject: &UserId,
        role: Role,
        issued_at: Timestamp,
        expires_at: Timestamp,
        now: Timestamp,
    ) -> Result<String, AuthError> {
        let claims = TokenClaims {
            sub: subject.as_str().to_string(),
            role,
            issued_at,
            expires_at,
            iat: issued_at.as_unix_secs(),
            nbf: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AuthError::signing_failed(e.to_string())
        })
    }
}

impl TokenService for JwtTokenAuthority {
    fn issue(&self, subject: &UserId, role: Role) -> Result<String, AuthError> {
        let now = self.clock.now().truncated_to_millis();
        let expires_at = self.expiry_from(now)?;
        self.sign(subject, role, now, expires_at, now)
    }

    fn validate(&self, token: &str) -> Result<IdentityClaim, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?;
        let claims = data.claims;

        let now = self.clock.now();
        if now.as_unix_secs() < claims.nbf {
            tracing::debug!(nbf = claims.nbf, "Token used before not-before time");
            return Err(AuthError::InvalidToken);
        }

        let subject_id = UserId::new(claims.sub).map_err(|_| {
            tracing::warn!("Signed token carries an empty subject");
            AuthError::InvalidToken
        })?;

        let claim = IdentityClaim {
            subject_id,
            role: claims.role,
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
        };

        if claim.is_expired_at(now) {
            tracing::debug!(expires_at = %claim.expires_at, "Token expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(claim)
    }

    fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let previous = self.validate(token)?;
        let now = self.clock.now().truncated_to_millis();

        // Two refreshes inside one millisecond must still move expiry forward.
        let issued_at = now.max(previous.issued_at.plus_millis(1));
        let expires_at = self
            .expiry_from(issued_at)?
            .max(previous.expires_at.plus_millis(1));

        self.sign(&previous.subject_id, previous.role, issued_at, expires_at, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use proptest::prelude::*;

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes!!";

    fn start() -> Timestamp {
        Timestamp::from_ymd(2024, 1, 1).unwrap()
    }

    fn authority_with_clock(secret: &str) -> (JwtTokenAuthority, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let authority = JwtTokenAuthority::new(
            &SecretString::new(secret.to_string()),
            Duration::hours(24),
            clock.clone(),
        );
        (authority, clock)
    }

    fn alice() -> UserId {
        UserId::new("alice").unwrap()
    }

    // ════════════════════════════════════════════════════════════════
    // Issue / validate
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn validate_returns_issued_identity() {
        let (authority, _) = authority_with_clock(SECRET);
        let token = authority.issue(&alice(), Role::Admin).unwrap();

        let claim = authority.validate(&token).unwrap();
        assert_eq!(claim.subject_id, alice());
        assert_eq!(claim.role, Role::Admin);
        assert_eq!(claim.issued_at, start());
        assert_eq!(claim.expires_at, start().plus_hours(24));
    }

    #[test]
    fn token_is_invalid_exactly_at_expiry() {
        let (authority, clock) = authority_with_clock(SECRET);
        let token = authority.issue(&alice(), Role::User).unwrap();

        clock.advance(Duration::hours(24) - Duration::milliseconds(1));
        assert!(authority.validate(&token).is_ok());

        clock.advance(Duration::milliseconds(1));
        assert_eq!(authority.validate(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let (issuer, _) = authority_with_clock("another-secret-that-is-32-bytes-long!!");
        let (verifier, _) = authority_with_clock(SECRET);
        let token = issuer.issue(&alice(), Role::User).unwrap();

        assert_eq!(verifier.validate(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let (authority, _) = authority_with_clock(SECRET);
        let token = authority.issue(&alice(), Role::User).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = "eyJzdWIiOiJtYWxsb3J5In0";
        parts[1] = forged_payload;

        assert_eq!(
            authority.validate(&parts.join(".")),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn garbage_is_rejected() {
        let (authority, _) = authority_with_clock(SECRET);
        assert_eq!(authority.validate("not.a.token"), Err(AuthError::InvalidToken));
        assert_eq!(authority.validate(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_from_the_future_is_rejected() {
        let (authority, clock) = authority_with_clock(SECRET);
        clock.advance(Duration::hours(1));
        let token = authority.issue(&alice(), Role::User).unwrap();

        clock.set(start());
        assert_eq!(authority.validate(&token), Err(AuthError::InvalidToken));
    }

    // ════════════════════════════════════════════════════════════════
    // Refresh
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn refresh_keeps_identity_and_extends_expiry() {
        let (authority, clock) = authority_with_clock(SECRET);
        let token = authority.issue(&alice(), Role::User).unwrap();
        let original = authority.validate(&token).unwrap();

        clock.advance(Duration::hours(1));
        let refreshed = authority.refresh(&token).unwrap();
        let claim = authority.validate(&refreshed).unwrap();

        assert_eq!(claim.subject_id, original.subject_id);
        assert_eq!(claim.role, original.role);
        assert_eq!(claim.expires_at, start().plus_hours(25));
    }

    #[test]
    fn refresh_without_clock_movement_still_extends_expiry() {
        let (authority, _) = authority_with_clock(SECRET);
        let token = authority.issue(&alice(), Role::User).unwrap();
        let original = authority.validate(&token).unwrap();

        let refreshed = authority.refresh(&token).unwrap();
        let claim = authority.validate(&refreshed).unwrap();

        assert!(claim.expires_at > original.expires_at);
    }

    #[test]
    fn refresh_of_expired_token_fails() {
        let (authority, clock) = authority_with_clock(SECRET);
        let token = authority.issue(&alice(), Role::User).unwrap();

        clock.advance(Duration::hours(25));
        assert_eq!(authority.refresh(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn issue_pair_returns_two_valid_tokens() {
        let (authority, _) = authority_with_clock(SECRET);
        let pair = authority.issue_pair(&alice(), Role::User).unwrap();

        assert!(authority.validate(&pair.access_token).is_ok());
        assert!(authority.validate(&pair.refresh_token).is_ok());
        assert_eq!(pair.expires_at, start().plus_hours(24));
    }

    #[test]
    fn lifetime_past_calendar_range_fails_instead_of_panicking() {
        let clock = Arc::new(ManualClock::new(start()));
        let authority = JwtTokenAuthority::new(
            &SecretString::new(SECRET.to_string()),
            Duration::days(100_000_000),
            clock,
        );

        assert!(matches!(
            authority.issue(&alice(), Role::User),
            Err(AuthError::SigningFailed(_))
        ));
    }

    #[test]
    fn refresh_with_overflowing_lifetime_fails_cleanly() {
        let (issuer, clock) = authority_with_clock(SECRET);
        let token = issuer.issue(&alice(), Role::User).unwrap();
        let refresher = JwtTokenAuthority::new(
            &SecretString::new(SECRET.to_string()),
            Duration::days(100_000_000),
            clock,
        );

        assert!(matches!(
            refresher.refresh(&token),
            Err(AuthError::SigningFailed(_))
        ));
    }

    // ════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn issued_tokens_validate_to_their_identity(
            subject in "[a-zA-Z0-9_-]{1,40}",
            admin in any::<bool>(),
            offset_ms in 0i64..(24 * 3600 * 1000),
        ) {
            let (authority, clock) = authority_with_clock(SECRET);
            let role = if admin { Role::Admin } else { Role::User };
            let user = UserId::new(subject).unwrap();

            let token = authority.issue(&user, role).unwrap();
            clock.advance(Duration::milliseconds(offset_ms));

            let claim = authority.validate(&token).unwrap();
            prop_assert_eq!(claim.subject_id, user);
            prop_assert_eq!(claim.role, role);
            prop_assert!(claim.expires_at > clock.now());
        }

        #[test]
        fn tokens_fail_once_past_expiry(extra_ms in 0i64..1_000_000) {
            let (authority, clock) = authority_with_clock(SECRET);
            let token = authority.issue(&alice(), Role::User).unwrap();

            clock.advance(Duration::hours(24) + Duration::milliseconds(extra_ms));
            prop_assert_eq!(authority.validate(&token), Err(AuthError::InvalidToken));
            prop_assert_eq!(authority.refresh(&token), Err(AuthError::InvalidToken));
        }
    }
}
