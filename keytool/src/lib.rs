//! Command definitions and handlers for the Watchdog key tool.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use watchdog_license::{
    compose_quick_apply_link, decompose_quick_apply_link, is_serial_valid, link_scheme,
    KeyedDigestGenerator, RegistrationRequest, SerialGenerator, SerialScheme, SignedSerialIssuer,
    SignedSerialVerifier,
};
use watchdog_registration::RegistrationConfig;

#[derive(Parser, Debug)]
#[command(name = "watchdog-keytool")]
#[command(about = "Issue and check Watchdog serials and quick-apply links")]
pub struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the serial for a customer name
    Generate {
        /// Customer name the serial is issued to
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        key: IssueKey,
    },

    /// Check that a serial belongs to a customer name
    Check {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Serial to check
        #[arg(short, long)]
        serial: String,

        #[command(flatten)]
        key: VerifyKey,
    },

    /// Build a quick-apply link
    Link {
        /// Application bundle name
        #[arg(short, long)]
        bundle: String,

        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Serial
        #[arg(short, long)]
        serial: String,
    },

    /// Split a quick-apply link into customer name and serial
    Decompose {
        /// Application bundle name the link must belong to
        #[arg(short, long)]
        bundle: String,

        /// The quick-apply link
        link: String,
    },

    /// Generate a fresh Ed25519 key pair for signed serials
    Keypair,

    /// Validate a registration.toml file
    CheckConfig {
        /// Path to the config file
        path: PathBuf,
    },
}

/// Key material for issuing serials.
#[derive(clap::Args, Debug, Clone)]
pub struct IssueKey {
    /// Vendor secret for keyed-digest serials
    #[arg(long, env = "WATCHDOG_SERIAL_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Hex Ed25519 seed for signed serials; takes precedence over --secret
    #[arg(long)]
    pub signing_key: Option<String>,
}

/// Key material for checking serials.
#[derive(clap::Args, Debug, Clone)]
pub struct VerifyKey {
    /// Vendor secret for keyed-digest serials
    #[arg(long, env = "WATCHDOG_SERIAL_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Hex Ed25519 public key for signed serials; takes precedence over --secret
    #[arg(long)]
    pub public_key: Option<String>,
}

impl IssueKey {
    fn generator(&self) -> Result<Box<dyn SerialGenerator>> {
        match (&self.signing_key, &self.secret) {
            (Some(seed), _) => {
                let issuer =
                    SignedSerialIssuer::from_hex(seed).context("Failed to load signing key")?;
                Ok(Box::new(issuer))
            }
            (None, Some(secret)) => Ok(Box::new(KeyedDigestGenerator::new(secret))),
            (None, None) => bail!("either --secret or --signing-key is required"),
        }
    }
}

impl VerifyKey {
    fn scheme(&self) -> Result<Box<dyn SerialScheme>> {
        match (&self.public_key, &self.secret) {
            (Some(public_key), _) => {
                let verifier = SignedSerialVerifier::from_hex(public_key)
                    .context("Failed to load public key")?;
                Ok(Box::new(verifier))
            }
            (None, Some(secret)) => Ok(Box::new(KeyedDigestGenerator::new(secret))),
            (None, None) => bail!("either --secret or --public-key is required"),
        }
    }
}

/// What a command printed, and whether the process should exit successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub lines: Vec<String>,
    pub success: bool,
}

impl Report {
    fn ok(lines: Vec<String>) -> Self {
        Self {
            lines,
            success: true,
        }
    }
}

/// Runs one command.
///
/// # Errors
///
/// Returns an error for unusable input or key material. A serial that does
/// not match is not an error; it yields an unsuccessful [`Report`].
pub fn execute(command: &Command) -> Result<Report> {
    match command {
        Command::Generate { name, key } => {
            let generator = key.generator()?;
            if name.trim().is_empty() {
                bail!("customer name must not be empty");
            }
            debug!("Generating serial");
            Ok(Report::ok(vec![generator.generate(name)]))
        }
        Command::Check { name, serial, key } => {
            let scheme = key.scheme()?;
            let valid = is_serial_valid(serial, name, &*scheme)
                .context("Cannot check serial")?;
            info!("Serial check finished: valid={}", valid);
            let verdict = if valid { "valid" } else { "invalid" };
            Ok(Report {
                lines: vec![verdict.to_string()],
                success: valid,
            })
        }
        Command::Link {
            bundle,
            name,
            serial,
        } => {
            let request = RegistrationRequest::new(name.as_str(), serial.as_str());
            let link = compose_quick_apply_link(bundle, &request)
                .context("Cannot build quick-apply link")?;
            Ok(Report::ok(vec![link]))
        }
        Command::Decompose { bundle, link } => {
            let request = decompose_quick_apply_link(link, bundle)
                .context("Cannot decompose quick-apply link")?;
            Ok(Report::ok(vec![
                format!("customer name: {}", request.customer_name),
                format!("license key: {}", request.license_key),
            ]))
        }
        Command::Keypair => {
            let seed: [u8; 32] = rand::random();
            let issuer = SignedSerialIssuer::from_seed(&seed);
            Ok(Report::ok(vec![
                format!("signing key: {}", hex::encode(seed)),
                format!("public key: {}", hex::encode(issuer.public_key())),
            ]))
        }
        Command::CheckConfig { path } => {
            let config = RegistrationConfig::load_from(path)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            let scheme = link_scheme(&config.bundle_name)?;
            Ok(Report::ok(vec![
                format!("bundle name: {}", config.bundle_name),
                format!("link scheme: {scheme}://"),
                format!("lost key page: {}", config.lost_key_url),
                format!("purchase page: {}", config.buy_online_url),
            ]))
        }
    }
}
