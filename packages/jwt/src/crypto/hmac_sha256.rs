//! HMAC-SHA256 operations for HS256 signing and verification

use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Shared HMAC secret.
///
/// The secret is wiped on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct HmacKey {
    secret: Zeroizing<Vec<u8>>,
}

impl HmacKey {
    /// Wrap raw secret bytes.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
        }
    }

    /// HMAC-SHA256(key = secret, message = input)
    ///
    /// # Errors
    /// `JwtError::Crypto` if the MAC cannot be keyed (HMAC accepts any key
    /// length, so this does not happen in practice).
    pub fn sign(&self, input: &[u8]) -> JwtResult<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| JwtError::crypto("Invalid HMAC key"))?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Recompute the MAC and compare in constant time.
    ///
    /// # Errors
    /// Same as [`HmacKey::sign`].
    pub fn verify(&self, input: &[u8], signature: &[u8]) -> JwtResult<bool> {
        let expected = self.sign(input)?;
        Ok(expected.ct_eq(signature).into())
    }
}

impl std::fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacKey")
            .field("secret", &format_args!("<{} bytes redacted>", self.secret.len()))
            .finish()
    }
}
