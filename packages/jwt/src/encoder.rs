//! Token encoder: header + claims + signature into the three-segment form.

use crate::{
    claims::Claims,
    codec,
    error::{JwtError, JwtResult},
    traits::Signer,
    types::{Header, Token},
};
use chrono::{DateTime, Duration, Utc};
use tokenstamp_common::fingerprint;

/// Lifetime (seconds) applied when the caller supplies none.
pub const DEFAULT_LIFETIME_SECS: i64 = 3600;

/// Encode `claims` into a signed token.
///
/// The signing input is `base64url(header) + "." + base64url(payload)`,
/// signed exactly as assembled. Nothing is returned unless signing succeeds.
///
/// # Errors
/// `JwtError::KeyUnavailable` if the scheme holds no signing key;
/// `JwtError::Crypto` if the provider fails.
pub fn encode<S: Signer + ?Sized>(claims: &Claims, scheme: &S) -> JwtResult<Token> {
    let header = Header::new(scheme.algorithm());

    let header_json =
        serde_json::to_vec(&header).map_err(|e| JwtError::serialization(&e.to_string()))?;
    let payload_json =
        serde_json::to_vec(claims).map_err(|e| JwtError::serialization(&e.to_string()))?;

    let header_b64 = codec::encode(&header_json);
    let payload_b64 = codec::encode(&payload_json);

    let mut signing_input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
    signing_input.push_str(&header_b64);
    signing_input.push('.');
    signing_input.push_str(&payload_b64);

    let signature = scheme.sign(signing_input.as_bytes()).map_err(|e| {
        tracing::error!(alg = %header.alg, error = %e, "token signing failed");
        e
    })?;

    tracing::debug!(
        alg = %header.alg,
        subject = %fingerprint(&claims.subject),
        exp = claims.expires_at,
        "token issued"
    );

    Ok(Token::from_segments(&signing_input, &codec::encode(&signature)))
}

/// Issue a token for `subject` at instant `now`.
///
/// Expires `lifetime` after `now`, or one hour after `now` when `None`.
///
/// # Errors
/// Same as [`encode`].
pub fn create_token_at<S: Signer + ?Sized>(
    subject: &str,
    claims: &str,
    scheme: &S,
    lifetime: Option<Duration>,
    now: DateTime<Utc>,
) -> JwtResult<Token> {
    let lifetime = lifetime.unwrap_or_else(|| Duration::seconds(DEFAULT_LIFETIME_SECS));
    let claims = Claims::new(subject, claims, now, lifetime);
    encode(&claims, scheme)
}
