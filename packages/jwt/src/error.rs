//! JWT error types and validation failure reasons

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// JWT error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Input is not valid unpadded base64url
    #[error("Malformed base64url encoding: {0}")]
    MalformedEncoding(String),
    /// Wrong segment count, undecodable segment or unparsable payload
    #[error("Malformed token: {0}")]
    MalformedToken(String),
    /// Signature does not match the signing input
    #[error("Invalid token signature")]
    SignatureInvalid,
    /// Current time is past the `exp` claim
    #[error("Token has expired")]
    Expired,
    /// Required key material is missing or inactive
    #[error("Key unavailable: {0}")]
    KeyUnavailable(String),
    /// Key material could not be parsed
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// The crypto provider failed
    #[error("Cryptographic operation failed: {0}")]
    Crypto(String),
    /// Header or payload serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Background task failed
    #[error("Background task failed")]
    TaskFailed,
}

impl JwtError {
    /// Create a malformed encoding error
    #[inline]
    #[must_use]
    pub fn malformed_encoding(msg: &str) -> Self {
        JwtError::MalformedEncoding(msg.to_string())
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed_token(msg: &str) -> Self {
        JwtError::MalformedToken(msg.to_string())
    }

    /// Create a key unavailable error
    #[inline]
    #[must_use]
    pub fn key_unavailable(msg: &str) -> Self {
        JwtError::KeyUnavailable(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKey(msg.to_string())
    }

    /// Create a crypto provider error
    #[inline]
    #[must_use]
    pub fn crypto(msg: &str) -> Self {
        JwtError::Crypto(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Classify this error as the reason a token failed validation.
    #[must_use]
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            JwtError::MalformedEncoding(_)
            | JwtError::MalformedToken(_)
            | JwtError::Serialization(_) => FailureReason::MalformedToken,
            JwtError::SignatureInvalid => FailureReason::SignatureInvalid,
            JwtError::Expired => FailureReason::Expired,
            JwtError::KeyUnavailable(_)
            | JwtError::InvalidKey(_)
            | JwtError::Crypto(_)
            | JwtError::TaskFailed => FailureReason::KeyUnavailable,
        }
    }
}

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// Wrong segment count, invalid base64url or unparsable payload
    MalformedToken,
    /// Signature does not match
    SignatureInvalid,
    /// Current time is past `exp`
    Expired,
    /// Verification key missing or inactive
    KeyUnavailable,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureReason::MalformedToken => "malformed token",
            FailureReason::SignatureInvalid => "signature invalid",
            FailureReason::Expired => "expired",
            FailureReason::KeyUnavailable => "key unavailable",
        };
        f.write_str(name)
    }
}
