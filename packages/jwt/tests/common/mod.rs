//! Shared fixtures for the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rsa::rand_core::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::sync::OnceLock;
use tokenstamp_jwt::{SigningScheme, crypto::RsaKeyPair};

/// 2025-01-01T00:00:00Z
pub fn issue_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).expect("valid timestamp")
}

fn generate() -> (RsaPrivateKey, RsaPublicKey) {
    let private_key = RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA key generation");
    let public_key = RsaPublicKey::from(&private_key);
    (private_key, public_key)
}

/// First RSA key pair, generated once per test binary.
pub fn rsa_a() -> &'static (RsaPrivateKey, RsaPublicKey) {
    static KEYS: OnceLock<(RsaPrivateKey, RsaPublicKey)> = OnceLock::new();
    KEYS.get_or_init(generate)
}

/// Second, unrelated RSA key pair.
pub fn rsa_b() -> &'static (RsaPrivateKey, RsaPublicKey) {
    static KEYS: OnceLock<(RsaPrivateKey, RsaPublicKey)> = OnceLock::new();
    KEYS.get_or_init(generate)
}

pub fn rsa_scheme(keys: &(RsaPrivateKey, RsaPublicKey)) -> SigningScheme {
    SigningScheme::Asymmetric(RsaKeyPair::from_keys(
        Some(keys.0.clone()),
        Some(keys.1.clone()),
    ))
}

pub fn rsa_verify_only(keys: &(RsaPrivateKey, RsaPublicKey)) -> SigningScheme {
    SigningScheme::Asymmetric(RsaKeyPair::from_keys(None, Some(keys.1.clone())))
}

/// Replace the character at `index` of segment `segment` with a different
/// base64url character, leaving the other segments untouched.
pub fn tamper(token: &str, segment: usize, index: usize) -> String {
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let mut chars: Vec<char> = parts[segment].chars().collect();
    chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
    parts[segment] = chars.into_iter().collect();
    parts.join(".")
}
