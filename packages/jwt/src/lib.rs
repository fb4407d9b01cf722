//! Compact signed identity tokens
//!
//! This crate issues and verifies three-segment JWT-style tokens carrying a
//! subject, an opaque claims string and an expiration instant:
//! - HS256 (shared secret) and RS256 (RSA key pair) signing schemes
//! - Unpadded base64url segment codec
//! - Typed validation results: malformed, signature invalid, expired,
//!   key unavailable
//! - Key records resolved through a caller-supplied [`KeyProvider`]
//!
//! ```no_run
//! use tokenstamp_jwt::{SigningScheme, create_token, validate_token};
//!
//! let scheme = SigningScheme::symmetric(b"s3cr3t");
//! let token = create_token("alice", "admin,user", &scheme, None)?;
//! let result = validate_token(token.as_str(), &scheme);
//! assert!(result.valid);
//! # Ok::<(), tokenstamp_jwt::JwtError>(())
//! ```

pub mod claims;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod encoder;
mod error;
pub mod futures;
pub mod key;
pub mod scheme;
pub mod service;
pub mod traits;
mod types;
pub mod validation;
pub mod validator;

pub use claims::{Claims, ClaimsBuilder};
pub use config::TokenConfig;
pub use encoder::{DEFAULT_LIFETIME_SECS, create_token_at, encode};
pub use error::*;
pub use key::{Key, KeyId, KeyKind, KeyProvider, resolve_scheme};
pub use scheme::SigningScheme;
pub use service::TokenService;
pub use traits::Signer;
pub use types::*;
pub use validation::ValidationOptions;
pub use validator::{ValidationResult, decode_and_verify, validate_at};

use chrono::{Duration, Utc};

/// Issue a token for `subject`, expiring after `lifetime` (one hour if `None`).
///
/// # Errors
/// `JwtError::KeyUnavailable` if the scheme holds no signing key.
pub fn create_token<S: Signer + ?Sized>(
    subject: &str,
    claims: &str,
    scheme: &S,
    lifetime: Option<Duration>,
) -> JwtResult<Token> {
    create_token_at(subject, claims, scheme, lifetime, Utc::now())
}

/// Validate a token against the current time with zero clock skew.
#[must_use]
pub fn validate_token<S: Signer + ?Sized>(token: &str, scheme: &S) -> ValidationResult {
    validate_at(token, scheme, Utc::now(), &ValidationOptions::strict())
}
