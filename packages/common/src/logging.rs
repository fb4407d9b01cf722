//! Structured logging bootstrap
//!
//! Library crates emit events through `tracing` (built with its `log`
//! feature), so a single `env_logger` installation here captures them all.

use log::{info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup; later calls are no-ops)
    ///
    /// Levels are configured through `RUST_LOG`:
    /// - `RUST_LOG=info` - issued tokens and key lifecycle events
    /// - `RUST_LOG=debug` - every validation outcome
    /// - `RUST_LOG=tokenstamp_jwt=warn` - only rejected tokens
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs the logger.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a token lifecycle event without exposing the token itself
    pub fn log_token_event(event: &str, token: &str, success: bool) {
        let token_hash = fingerprint(token);
        if success {
            info!("Token {event} succeeded (token_hash: {token_hash})");
        } else {
            warn!("Token {event} failed (token_hash: {token_hash})");
        }
    }
}

/// Log-safe fingerprint of a sensitive value.
///
/// Returns `#` followed by the first 12 hex characters of its SHA-256 digest.
#[must_use]
pub fn fingerprint(value: &str) -> String {
    let hash = Sha256::digest(value.as_bytes());
    let hex_hash = format!("{hash:x}");
    format!("#{}", &hex_hash[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_short() {
        LoggingTransformer::init_test();

        let first = fingerprint("eyJhbGciOiJIUzI1NiJ9.e30.c2ln");
        let other = fingerprint("eyJhbGciOiJSUzI1NiJ9.e30.c2ln");

        assert_ne!(first, other);
        assert_eq!(first, fingerprint("eyJhbGciOiJIUzI1NiJ9.e30.c2ln"));
        assert!(first.starts_with('#'));
        assert_eq!(first.len(), 13);
    }

    #[test]
    fn fingerprint_of_empty_input() {
        // SHA-256("") = e3b0c44298fc1c149afbf4c8996fb924...
        assert_eq!(fingerprint(""), "#e3b0c44298fc");
    }

    #[test]
    fn token_events_do_not_panic() {
        LoggingTransformer::init_test();

        LoggingTransformer::log_token_event("issue", "a.b.c", true);
        LoggingTransformer::log_token_event("validate", "a.b.c", false);
    }
}
