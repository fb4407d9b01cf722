//! Header, algorithm and token wire types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature algorithm tag carried in the header `alg` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// HMAC-SHA256 over a shared secret
    HS256,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
}

impl Algorithm {
    /// Header `alg` value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::RS256 => "RS256",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT header.
///
/// Field order is fixed so the serialized form is always
/// `{"alg":"HS256"|"RS256","typ":"JWT"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm used for signing
    pub alg: Algorithm,
    /// Token type (always "JWT")
    pub typ: String,
}

impl Header {
    /// Create the header for the given algorithm
    #[must_use]
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            typ: "JWT".to_string(),
        }
    }
}

/// Three-segment token string: `header.payload.signature`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) fn from_segments(signing_input: &str, signature_b64: &str) -> Self {
        let mut token = String::with_capacity(signing_input.len() + 1 + signature_b64.len());
        token.push_str(signing_input);
        token.push('.');
        token.push_str(signature_b64);
        Self(token)
    }

    /// Borrow the wire form
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_serializes_canonically() {
        let hs = serde_json::to_string(&Header::new(Algorithm::HS256)).unwrap();
        let rs = serde_json::to_string(&Header::new(Algorithm::RS256)).unwrap();

        assert_eq!(hs, r#"{"alg":"HS256","typ":"JWT"}"#);
        assert_eq!(rs, r#"{"alg":"RS256","typ":"JWT"}"#);
    }
}
