//! Signature primitives backing the two signing schemes

pub mod hmac_sha256;
pub mod rsa_sha256;

pub use hmac_sha256::HmacKey;
pub use rsa_sha256::RsaKeyPair;
