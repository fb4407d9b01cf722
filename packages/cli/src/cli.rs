//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokenstamp_key::generator::DEFAULT_RSA_BITS;

#[derive(Debug, Parser)]
#[command(name = "tokenstamp")]
#[command(about = "Issue and verify signed identity tokens")]
pub struct Cli {
    /// JSON configuration file (default lifetime, validation leeway)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Generate signing key material
    #[command(subcommand)]
    Keygen(Keygen),

    /// Issue a token
    ///
    /// Example usage:
    ///   tokenstamp sign --subject alice --claims admin,user --secret <B64>
    ///   tokenstamp sign --subject alice --lifetime 600 --private-key private.pem
    Sign {
        /// Identity the token is issued to
        #[arg(long)]
        subject: String,

        /// Opaque claims string
        #[arg(long, default_value = "")]
        claims: String,

        /// Lifetime in seconds (defaults to the configured lifetime)
        #[arg(long, value_name = "SECS")]
        lifetime: Option<i64>,

        #[command(flatten)]
        key: SigningKeyArgs,
    },

    /// Validate a token and print the result as JSON
    ///
    /// Exits with status 1 when the token is rejected.
    Verify {
        /// Token to validate
        token: String,

        #[command(flatten)]
        key: VerifyingKeyArgs,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum Keygen {
    /// Random 32-byte HMAC secret, printed as base64url
    Symmetric {
        /// Write the secret to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// RSA key pair written as PKCS#8 / SPKI PEM files
    Rsa {
        /// Modulus size in bits
        #[arg(long, default_value_t = DEFAULT_RSA_BITS)]
        bits: usize,

        /// Destination of the private key
        #[arg(long, value_name = "FILE")]
        private: PathBuf,

        /// Destination of the public key
        #[arg(long, value_name = "FILE")]
        public: PathBuf,
    },
}

/// Key used to sign: an HMAC secret or an RSA private key.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct SigningKeyArgs {
    /// Base64url-encoded HMAC secret
    #[arg(long, value_name = "B64")]
    pub secret: Option<String>,

    /// PKCS#8 PEM private key file
    #[arg(long, value_name = "PEM_FILE")]
    pub private_key: Option<PathBuf>,
}

/// Key used to verify: an HMAC secret or an RSA public key.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct VerifyingKeyArgs {
    /// Base64url-encoded HMAC secret
    #[arg(long, value_name = "B64")]
    pub secret: Option<String>,

    /// SPKI PEM public key file
    #[arg(long, value_name = "PEM_FILE")]
    pub public_key: Option<PathBuf>,
}
