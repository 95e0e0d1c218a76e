//! Impulse command-line tool
//!
//! Usage:
//!   impulse generate --style gaming -n 5
//!   impulse activate AAAAA-AAAAA-AAAAA-AAAAC
//!   impulse status
//!   RUST_LOG=impulse_license=trace impulse status

use anyhow::Result;
use clap::Parser;
use impulse_cli::{log_filter, run, Cli};
use std::process::ExitCode;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let positive = run(&cli, &mut std::io::stdout().lock())?;
    Ok(if positive {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
