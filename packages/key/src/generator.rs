//! Key material generation
//!
//! Symmetric secrets come from the thread-local CSPRNG. RSA key pairs are
//! emitted as PKCS#8 DER (private) and SPKI DER (public), the formats
//! [`tokenstamp_jwt::Key`] expects.

use crate::error::{KeyError, Result};
use rand::Rng;
use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use rsa::rand_core::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// Length of generated HMAC secrets in bytes.
pub const SYMMETRIC_SECRET_LEN: usize = 32;

/// Default RSA modulus size in bits.
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Smallest RSA modulus accepted for signing keys.
pub const MIN_RSA_BITS: usize = 2048;

/// Generate a random HMAC-SHA256 secret.
#[must_use]
pub fn generate_symmetric_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(vec![0u8; SYMMETRIC_SECRET_LEN]);
    rand::rng().fill(secret.as_mut_slice());
    secret
}

/// DER-encoded RSA key pair.
#[derive(Clone)]
pub struct RsaKeyMaterial {
    private_der: Zeroizing<Vec<u8>>,
    public_der: Vec<u8>,
}

impl RsaKeyMaterial {
    /// PKCS#8 DER private key.
    #[must_use]
    pub fn private_der(&self) -> &[u8] {
        &self.private_der
    }

    /// SPKI DER public key.
    #[must_use]
    pub fn public_der(&self) -> &[u8] {
        &self.public_der
    }

    /// Split into owned private and public DER buffers.
    #[must_use]
    pub fn into_parts(self) -> (Zeroizing<Vec<u8>>, Vec<u8>) {
        (self.private_der, self.public_der)
    }

    /// PKCS#8 PEM private key.
    ///
    /// # Errors
    /// `KeyError::KeyGeneration` if the stored DER cannot be re-encoded.
    pub fn private_pem(&self) -> Result<Zeroizing<String>> {
        RsaPrivateKey::from_pkcs8_der(&self.private_der)
            .and_then(|key| key.to_pkcs8_pem(LineEnding::LF))
            .map_err(|e| KeyError::key_generation(format!("private key PEM encoding: {e}")))
    }

    /// SPKI PEM public key.
    ///
    /// # Errors
    /// `KeyError::KeyGeneration` if the stored DER cannot be re-encoded.
    pub fn public_pem(&self) -> Result<String> {
        RsaPublicKey::from_public_key_der(&self.public_der)
            .and_then(|key| key.to_public_key_pem(LineEnding::LF))
            .map_err(|e| KeyError::key_generation(format!("public key PEM encoding: {e}")))
    }
}

impl fmt::Debug for RsaKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyMaterial")
            .field("private_der", &"<redacted>")
            .field("public_der_len", &self.public_der.len())
            .finish()
    }
}

/// Generate an RSA key pair with a `bits`-bit modulus.
///
/// # Errors
/// `KeyError::InvalidKeySize` below [`MIN_RSA_BITS`];
/// `KeyError::KeyGeneration` if generation or DER encoding fails.
pub fn generate_rsa_keypair(bits: usize) -> Result<RsaKeyMaterial> {
    if bits < MIN_RSA_BITS {
        return Err(KeyError::InvalidKeySize {
            minimum: MIN_RSA_BITS,
            actual: bits,
        });
    }

    let private_key = RsaPrivateKey::new(&mut OsRng, bits)
        .map_err(|e| KeyError::key_generation(format!("RSA-{bits}: {e}")))?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_der = private_key
        .to_pkcs8_der()
        .map_err(|e| KeyError::key_generation(format!("private key DER encoding: {e}")))?;
    let public_der = public_key
        .to_public_key_der()
        .map_err(|e| KeyError::key_generation(format!("public key DER encoding: {e}")))?;

    tracing::debug!(bits, "generated RSA key pair");

    Ok(RsaKeyMaterial {
        private_der: Zeroizing::new(private_der.as_bytes().to_vec()),
        public_der: public_der.as_bytes().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_secrets_are_fresh() {
        let a = generate_symmetric_secret();
        let b = generate_symmetric_secret();
        assert_eq!(a.len(), SYMMETRIC_SECRET_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn small_rsa_modulus_is_refused() {
        assert_eq!(
            generate_rsa_keypair(1024).unwrap_err(),
            KeyError::InvalidKeySize {
                minimum: 2048,
                actual: 1024
            }
        );
    }
}
