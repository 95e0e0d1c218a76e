//! Command-line front end for Impulse.
//!
//! Exposes the username generator and the license gate as subcommands. Each
//! command writes its human-readable result to the supplied writer and
//! reports whether the answer was positive, which `main` turns into the exit
//! code.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use impulse_license::{render_report, ActivationStatus, KeyGate, KeyIssuer, LicenseKey};
use impulse_names::{NameGenerator, Style};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Default log directive: the workspace crates at `debug` or `info`,
/// dependencies at `warn`.
#[must_use]
pub fn default_log_directive(verbose: bool) -> &'static str {
    if verbose {
        "impulse_cli=debug,impulse_license=debug,impulse_names=debug,warn"
    } else {
        "impulse_cli=info,impulse_license=info,impulse_names=info,warn"
    }
}

/// Log filter for the binary. `RUST_LOG` wins when set and valid.
#[must_use]
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbose)))
}

#[derive(Parser, Debug)]
#[command(name = "impulse")]
#[command(about = "Styled username generator with a local license gate")]
pub struct Cli {
    /// Path to the activation file (defaults to the user data directory)
    #[arg(long, global = true)]
    pub activation_file: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate usernames
    Generate {
        /// Name style: modern, gaming, elite or mystic (unknown styles use modern)
        #[arg(short, long, default_value = "modern")]
        style: String,

        /// How many distinct names to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },
    /// Check whether a license key is valid
    Validate {
        /// Key in XXXXX-XXXXX-XXXXX-XXXXX form
        key: String,
    },
    /// Validate and activate a license key on this machine
    Activate {
        /// Key in XXXXX-XXXXX-XXXXX-XXXXX form
        key: String,
    },
    /// Show the activation status (expired or foreign activations are cleared)
    Status,
    /// Clear the activation on this machine
    Reset,
    /// Issue a batch of license keys
    Issue {
        /// Secret the keys are derived from
        #[arg(long)]
        secret: String,

        /// Number of keys to issue
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn gate(&self) -> KeyGate {
        match &self.activation_file {
            Some(path) => KeyGate::open(path.clone()),
            None => KeyGate::at_default_location(),
        }
    }
}

/// Runs a parsed command, writing output to `out`.
///
/// Returns `Ok(false)` for a negative answer (invalid key, not activated).
///
/// # Errors
///
/// Returns an error if the activation file or report can't be written, or
/// if `activate` is given a key that fails validation.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<bool> {
    match &cli.command {
        Command::Generate { style, count } => {
            let style = Style::parse_or_default(style);
            debug!("Generating {} {} name(s)", count, style);
            let mut generator = NameGenerator::new();
            for name in generator.generate_batch(style, *count) {
                writeln!(out, "{name}")?;
            }
            Ok(true)
        }
        Command::Validate { key } => {
            let valid = cli.gate().validate(key);
            writeln!(out, "{}", if valid { "valid" } else { "invalid" })?;
            Ok(valid)
        }
        Command::Activate { key } => {
            let gate = cli.gate();
            if let Err(e) = LicenseKey::parse_accepted(key) {
                bail!("cannot activate: {e}");
            }
            gate.activate(key)
                .with_context(|| format!("failed to write {}", gate.store().path().display()))?;
            writeln!(out, "activated")?;
            Ok(true)
        }
        Command::Status => {
            let gate = cli.gate();
            gate.ensure_initialized()
                .with_context(|| format!("failed to create {}", gate.store().path().display()))?;
            let status = gate.check();
            writeln!(out, "{}", describe(status))?;
            Ok(status.is_active())
        }
        Command::Reset => {
            let gate = cli.gate();
            gate.reset()
                .with_context(|| format!("failed to write {}", gate.store().path().display()))?;
            writeln!(out, "activation cleared")?;
            Ok(true)
        }
        Command::Issue {
            secret,
            count,
            output,
        } => {
            let keys = KeyIssuer::new(secret.as_str()).issue(*count, Local::now().date_naive());
            let report = render_report(&keys, Local::now());
            match output {
                Some(path) => {
                    std::fs::write(path, &report)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Saved {} key(s) to {}", keys.len(), path.display());
                    writeln!(out, "wrote {} key(s) to {}", keys.len(), path.display())?;
                }
                None => write!(out, "{report}")?,
            }
            Ok(true)
        }
    }
}

/// One-line description of an activation status.
#[must_use]
pub fn describe(status: ActivationStatus) -> String {
    match status {
        ActivationStatus::NotActivated => "not activated".to_string(),
        ActivationStatus::Active {
            days_remaining: Some(days),
        } => format!("activated ({days} day(s) remaining)"),
        ActivationStatus::Active {
            days_remaining: None,
        } => "activated".to_string(),
        ActivationStatus::Expired => "activation expired".to_string(),
        ActivationStatus::MachineMismatch => "activated on a different machine".to_string(),
    }
}
