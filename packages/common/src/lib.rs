//! Common infrastructure shared by the tokenstamp crates
//!
//! This crate provides:
//! - `env_logger` bootstrap driven by `RUST_LOG`
//! - Log-safe fingerprints for tokens, subjects and key names

pub mod logging;

pub use logging::{LoggingTransformer, fingerprint};
