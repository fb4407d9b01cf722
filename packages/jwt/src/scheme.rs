//! Signing scheme: one abstraction, two variants.
//!
//! `Symmetric` signs with HMAC-SHA256 over a shared secret, `Asymmetric`
//! with RSA-SHA256 over a private key and verifies with the public key.

use crate::{
    crypto::{HmacKey, RsaKeyPair},
    error::JwtResult,
    traits::Signer,
    types::Algorithm,
};

/// Sign/verify capability handed to the encoder and validator.
#[derive(Debug, Clone)]
pub enum SigningScheme {
    /// HS256 with a shared secret
    Symmetric(HmacKey),
    /// RS256 with an optional private and optional public key
    Asymmetric(RsaKeyPair),
}

impl SigningScheme {
    /// HS256 scheme over raw secret bytes.
    #[must_use]
    pub fn symmetric(secret: impl AsRef<[u8]>) -> Self {
        SigningScheme::Symmetric(HmacKey::new(secret.as_ref().to_vec()))
    }

    /// RS256 scheme from PKCS#8 DER private and SPKI DER public keys.
    ///
    /// # Errors
    /// `JwtError::InvalidKey` if a supplied key cannot be decoded.
    pub fn rsa_from_der(private_der: Option<&[u8]>, public_der: Option<&[u8]>) -> JwtResult<Self> {
        Ok(SigningScheme::Asymmetric(RsaKeyPair::from_der(
            private_der,
            public_der,
        )?))
    }

    /// RS256 scheme from PKCS#8 PEM private and SPKI PEM public keys.
    ///
    /// # Errors
    /// `JwtError::InvalidKey` if a supplied key cannot be decoded.
    pub fn rsa_from_pem(private_pem: Option<&str>, public_pem: Option<&str>) -> JwtResult<Self> {
        Ok(SigningScheme::Asymmetric(RsaKeyPair::from_pem(
            private_pem,
            public_pem,
        )?))
    }
}

impl Signer for SigningScheme {
    fn algorithm(&self) -> Algorithm {
        match self {
            SigningScheme::Symmetric(_) => Algorithm::HS256,
            SigningScheme::Asymmetric(_) => Algorithm::RS256,
        }
    }

    fn sign(&self, input: &[u8]) -> JwtResult<Vec<u8>> {
        match self {
            SigningScheme::Symmetric(key) => key.sign(input),
            SigningScheme::Asymmetric(pair) => pair.sign(input),
        }
    }

    fn verify(&self, input: &[u8], signature: &[u8]) -> JwtResult<bool> {
        match self {
            SigningScheme::Symmetric(key) => key.verify(input, signature),
            SigningScheme::Asymmetric(pair) => pair.verify(input, signature),
        }
    }
}

impl From<HmacKey> for SigningScheme {
    fn from(key: HmacKey) -> Self {
        SigningScheme::Symmetric(key)
    }
}

impl From<RsaKeyPair> for SigningScheme {
    fn from(pair: RsaKeyPair) -> Self {
        SigningScheme::Asymmetric(pair)
    }
}
