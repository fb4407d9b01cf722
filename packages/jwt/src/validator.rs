//! Token decoder and validator.
//!
//! Validation runs as a short-circuiting state machine:
//! split → decode → verify signature → parse payload → check expiration.
//! Every failure, including those caused by attacker-controlled input, is
//! reported through [`ValidationResult`] rather than a panic.

use crate::{
    claims::Claims,
    codec,
    error::{FailureReason, JwtError, JwtResult},
    traits::Signer,
    types::Header,
    validation::ValidationOptions,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokenstamp_common::fingerprint;

/// Outcome of validating a token.
///
/// `subject`, `claims` and `expires_at` are populated only when `valid`;
/// `failure_reason` only when not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the token passed every check
    pub valid: bool,
    /// Subject carried by a valid token
    pub subject: Option<String>,
    /// Claims string carried by a valid token
    pub claims: Option<String>,
    /// Expiry (unix seconds) of a valid token
    pub expires_at: Option<i64>,
    /// Why an invalid token was rejected
    pub failure_reason: Option<FailureReason>,
}

impl ValidationResult {
    /// Result for a token that passed validation.
    #[must_use]
    pub fn accepted(claims: Claims) -> Self {
        Self {
            valid: true,
            subject: Some(claims.subject),
            claims: Some(claims.claims),
            expires_at: Some(claims.expires_at),
            failure_reason: None,
        }
    }

    /// Result for a rejected token.
    #[must_use]
    pub fn rejected(reason: FailureReason) -> Self {
        Self {
            valid: false,
            subject: None,
            claims: None,
            expires_at: None,
            failure_reason: Some(reason),
        }
    }

    /// Total mapping from a raw validation outcome.
    #[must_use]
    pub fn from_outcome(outcome: JwtResult<Claims>) -> Self {
        match outcome {
            Ok(claims) => Self::accepted(claims),
            Err(e) => Self::rejected(e.failure_reason()),
        }
    }
}

/// Validate `token` against `scheme` at instant `now`.
#[must_use]
pub fn validate_at<S: Signer + ?Sized>(
    token: &str,
    scheme: &S,
    now: DateTime<Utc>,
    options: &ValidationOptions,
) -> ValidationResult {
    let outcome = decode_and_verify(token, scheme, now, options);
    match &outcome {
        Ok(claims) => tracing::debug!(
            token = %fingerprint(token),
            subject = %fingerprint(&claims.subject),
            "token accepted"
        ),
        Err(e) => tracing::warn!(
            token = %fingerprint(token),
            reason = %e.failure_reason(),
            error = %e,
            "token rejected"
        ),
    }
    ValidationResult::from_outcome(outcome)
}

/// Run the validation state machine, returning the verified claims.
///
/// # Errors
/// - `JwtError::MalformedToken`: not exactly three non-empty segments, a
///   segment that is not base64url, or an unparsable header/payload
/// - `JwtError::SignatureInvalid`: signature mismatch, a non-canonical
///   signature encoding, or a header `alg` other than the scheme's
/// - `JwtError::KeyUnavailable`: the scheme holds no verification key
/// - `JwtError::Expired`: `exp` lies before `now` minus the leeway
pub fn decode_and_verify<S: Signer + ?Sized>(
    token: &str,
    scheme: &S,
    now: DateTime<Utc>,
    options: &ValidationOptions,
) -> JwtResult<Claims> {
    let (header_b64, payload_b64, signature_b64) = split(token)?;

    let header_json = decode_segment("header", header_b64)?;
    let payload_json = decode_segment("payload", payload_b64)?;
    let signature = decode_segment("signature", signature_b64)?;

    // Verify over the segments exactly as received, never a re-serialization.
    let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
    if !scheme.verify(signing_input.as_bytes(), &signature)? {
        return Err(JwtError::SignatureInvalid);
    }
    // The decoder ignores trailing bits; the signature text itself must be
    // the one the signer emitted.
    if codec::encode(&signature) != signature_b64 {
        return Err(JwtError::SignatureInvalid);
    }

    let header: Header = serde_json::from_slice(&header_json)
        .map_err(|e| JwtError::MalformedToken(format!("Invalid header JSON: {e}")))?;
    if header.alg != scheme.algorithm() {
        return Err(JwtError::SignatureInvalid);
    }

    let claims: Claims = serde_json::from_slice(&payload_json)
        .map_err(|e| JwtError::MalformedToken(format!("Invalid payload JSON: {e}")))?;

    let leeway = options.leeway.num_seconds();
    if claims.expires_at < now.timestamp().saturating_sub(leeway) {
        return Err(JwtError::Expired);
    }

    Ok(claims)
}

fn split(token: &str) -> JwtResult<(&str, &str, &str)> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((header, payload, signature))
        }
        _ => Err(JwtError::malformed_token(
            "token must have exactly three non-empty segments",
        )),
    }
}

fn decode_segment(name: &str, segment: &str) -> JwtResult<Vec<u8>> {
    codec::decode(segment).map_err(|e| JwtError::MalformedToken(format!("Invalid {name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_requires_three_non_empty_segments() {
        assert_eq!(split("a.b.c").unwrap(), ("a", "b", "c"));

        for bad in ["", "a", "a.b", "a.b.c.d", "a..c", ".b.c", "a.b.", "..", "a.b.c."] {
            assert!(
                matches!(split(bad), Err(JwtError::MalformedToken(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_outcome_populates_fields_exclusively() {
        let accepted = ValidationResult::from_outcome(Ok(Claims {
            subject: "alice".to_string(),
            claims: "admin".to_string(),
            expires_at: 42,
            issued_at: None,
        }));
        assert!(accepted.valid);
        assert_eq!(accepted.subject.as_deref(), Some("alice"));
        assert_eq!(accepted.claims.as_deref(), Some("admin"));
        assert_eq!(accepted.expires_at, Some(42));
        assert_eq!(accepted.failure_reason, None);

        let rejected = ValidationResult::from_outcome(Err(JwtError::Expired));
        assert!(!rejected.valid);
        assert_eq!(rejected.subject, None);
        assert_eq!(rejected.claims, None);
        assert_eq!(rejected.expires_at, None);
        assert_eq!(rejected.failure_reason, Some(FailureReason::Expired));
    }

    #[test]
    fn encoding_errors_surface_as_malformed_token() {
        let result =
            ValidationResult::from_outcome(Err(JwtError::malformed_encoding("bad alphabet")));
        assert_eq!(result.failure_reason, Some(FailureReason::MalformedToken));
    }
}
