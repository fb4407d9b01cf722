//! Command handlers

use crate::cli::{Keygen, SigningKeyArgs, VerifyingKeyArgs};
use anyhow::{Context, Result, bail};
use chrono::Duration;
use std::fs;
use std::io::Write;
use std::path::Path;
use tokenstamp_common::LoggingTransformer;
use tokenstamp_jwt::{SigningScheme, TokenConfig, TokenService, codec};
use tokenstamp_key::{generate_rsa_keypair, generate_symmetric_secret};
use zeroize::Zeroizing;

/// Generate key material.
pub fn handle_keygen(command: Keygen, out: &mut impl Write) -> Result<()> {
    match command {
        Keygen::Symmetric { out: None } => {
            let secret = Zeroizing::new(codec::encode(&generate_symmetric_secret()));
            writeln!(out, "{}", secret.as_str())?;
        }
        Keygen::Symmetric { out: Some(path) } => {
            let secret = Zeroizing::new(codec::encode(&generate_symmetric_secret()));
            write_secret_file(&path, secret.as_bytes())?;
            writeln!(out, "Secret written to {}", path.display())?;
        }
        Keygen::Rsa {
            bits,
            private,
            public,
        } => {
            let material = generate_rsa_keypair(bits)?;
            write_secret_file(&private, material.private_pem()?.as_bytes())?;
            fs::write(&public, material.public_pem()?)
                .with_context(|| format!("writing {}", public.display()))?;
            writeln!(
                out,
                "RSA-{bits} key pair written to {} and {}",
                private.display(),
                public.display()
            )?;
        }
    }
    Ok(())
}

/// Issue a token and print it.
pub fn handle_sign(
    config: TokenConfig,
    subject: &str,
    claims: &str,
    lifetime: Option<i64>,
    key: SigningKeyArgs,
    out: &mut impl Write,
) -> Result<()> {
    let lifetime = match lifetime {
        Some(secs) if secs <= 0 => bail!("lifetime must be positive, got {secs}"),
        Some(secs) => Some(
            Duration::try_seconds(secs).with_context(|| format!("lifetime {secs} is out of range"))?,
        ),
        None => None,
    };

    let scheme = match (key.secret, key.private_key) {
        (Some(secret), _) => symmetric_scheme(&secret)?,
        (None, Some(path)) => {
            let pem = read_key_file(&path)?;
            SigningScheme::rsa_from_pem(Some(pem.as_str()), None)?
        }
        (None, None) => bail!("either --secret or --private-key is required"),
    };

    let service = TokenService::with_config(scheme, config)?;
    let token = service.create_token(subject, claims, lifetime)?;
    LoggingTransformer::log_token_event("issue", token.as_str(), true);

    writeln!(out, "{token}")?;
    Ok(())
}

/// Validate a token and print the result as JSON. Returns whether it is valid.
pub fn handle_verify(
    config: TokenConfig,
    token: &str,
    key: VerifyingKeyArgs,
    out: &mut impl Write,
) -> Result<bool> {
    let scheme = match (key.secret, key.public_key) {
        (Some(secret), _) => symmetric_scheme(&secret)?,
        (None, Some(path)) => {
            let pem = read_key_file(&path)?;
            SigningScheme::rsa_from_pem(None, Some(pem.as_str()))?
        }
        (None, None) => bail!("either --secret or --public-key is required"),
    };

    let service = TokenService::with_config(scheme, config)?;
    let result = service.validate_token(token);
    LoggingTransformer::log_token_event("validation", token, result.valid);

    writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    Ok(result.valid)
}

fn symmetric_scheme(secret: &str) -> Result<SigningScheme> {
    let secret = Zeroizing::new(
        codec::decode(secret.trim()).context("secret is not valid unpadded base64url")?,
    );
    if secret.is_empty() {
        bail!("secret must not be empty");
    }
    Ok(SigningScheme::symmetric(secret.as_slice()))
}

fn read_key_file(path: &Path) -> Result<Zeroizing<String>> {
    fs::read_to_string(path)
        .map(Zeroizing::new)
        .with_context(|| format!("reading {}", path.display()))
}

fn write_secret_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("restricting permissions on {}", path.display()))?;
    }
    Ok(())
}
