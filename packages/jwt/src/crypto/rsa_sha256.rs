//! RSA-SHA256 (RS256) operations
//!
//! RSASSA-PKCS1-v1_5 over SHA-256. Private keys are PKCS#8, public keys are
//! SubjectPublicKeyInfo, each accepted as DER or PEM.

use crate::error::{JwtError, JwtResult};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer as _, Verifier as _};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;

/// RSA key material; either half may be absent.
///
/// `Debug` reports which halves are present, never the key material.
#[derive(Clone)]
pub struct RsaKeyPair {
    signing: Option<SigningKey<Sha256>>,
    verifying: Option<VerifyingKey<Sha256>>,
}

impl RsaKeyPair {
    /// Build from already-parsed keys.
    #[must_use]
    pub fn from_keys(private_key: Option<RsaPrivateKey>, public_key: Option<RsaPublicKey>) -> Self {
        Self {
            signing: private_key.map(SigningKey::<Sha256>::new),
            verifying: public_key.map(VerifyingKey::<Sha256>::new),
        }
    }

    /// Parse PKCS#8 DER private and SPKI DER public keys.
    ///
    /// # Errors
    /// `JwtError::InvalidKey` if a supplied key cannot be decoded.
    pub fn from_der(private_der: Option<&[u8]>, public_der: Option<&[u8]>) -> JwtResult<Self> {
        let private_key = private_der
            .map(|der| {
                RsaPrivateKey::from_pkcs8_der(der)
                    .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA private key: {e}")))
            })
            .transpose()?;
        let public_key = public_der
            .map(|der| {
                RsaPublicKey::from_public_key_der(der)
                    .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA public key: {e}")))
            })
            .transpose()?;
        Ok(Self::from_keys(private_key, public_key))
    }

    /// Parse PKCS#8 PEM private and SPKI PEM public keys.
    ///
    /// # Errors
    /// `JwtError::InvalidKey` if a supplied key cannot be decoded.
    pub fn from_pem(private_pem: Option<&str>, public_pem: Option<&str>) -> JwtResult<Self> {
        let private_key = private_pem
            .map(|pem| {
                RsaPrivateKey::from_pkcs8_pem(pem)
                    .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA private key: {e}")))
            })
            .transpose()?;
        let public_key = public_pem
            .map(|pem| {
                RsaPublicKey::from_public_key_pem(pem)
                    .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA public key: {e}")))
            })
            .transpose()?;
        Ok(Self::from_keys(private_key, public_key))
    }

    /// Whether a private key is held.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.signing.is_some()
    }

    /// Whether a public key is held.
    #[must_use]
    pub fn can_verify(&self) -> bool {
        self.verifying.is_some()
    }

    /// Sign with RSA-SHA256.
    ///
    /// # Errors
    /// `JwtError::KeyUnavailable` without a private key; `JwtError::Crypto`
    /// if the RSA operation fails.
    pub fn sign(&self, input: &[u8]) -> JwtResult<Vec<u8>> {
        let signing_key = self
            .signing
            .as_ref()
            .ok_or_else(|| JwtError::key_unavailable("RS256 signing requires a private key"))?;
        let signature = signing_key
            .try_sign(input)
            .map_err(|e| JwtError::Crypto(format!("RSA signing failed: {e}")))?;
        Ok(signature.to_bytes().as_ref().to_vec())
    }

    /// Verify an RSA-SHA256 signature.
    ///
    /// A signature of the wrong length is a mismatch, not an error.
    ///
    /// # Errors
    /// `JwtError::KeyUnavailable` without a public key.
    pub fn verify(&self, input: &[u8], signature: &[u8]) -> JwtResult<bool> {
        let verifying_key = self
            .verifying
            .as_ref()
            .ok_or_else(|| JwtError::key_unavailable("RS256 verification requires a public key"))?;
        let Ok(signature) = Signature::try_from(signature) else {
            return Ok(false);
        };
        Ok(verifying_key.verify(input, &signature).is_ok())
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("has_private", &self.can_sign())
            .field("has_public", &self.can_verify())
            .finish()
    }
}
