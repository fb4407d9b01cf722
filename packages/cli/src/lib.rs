//! Command-line front end for `tokenstamp_jwt`
//!
//! ```text
//! tokenstamp keygen symmetric
//! tokenstamp sign --subject alice --claims admin --secret <B64>
//! tokenstamp verify <TOKEN> --secret <B64>
//! ```

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, Keygen};

use anyhow::{Context, Result};
use std::io::Write;
use tokenstamp_jwt::TokenConfig;

/// Execute a parsed command line, writing results to `out`.
///
/// Returns `false` when `verify` rejects its token.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => TokenConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => TokenConfig::default(),
    };
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Keygen(command) => commands::handle_keygen(command, out).map(|()| true),
        Commands::Sign {
            subject,
            claims,
            lifetime,
            key,
        } => commands::handle_sign(config, &subject, &claims, lifetime, key, out).map(|()| true),
        Commands::Verify { token, key } => commands::handle_verify(config, &token, key, out),
    }
}
