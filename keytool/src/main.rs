//! Watchdog key tool
//!
//! Vendor-side helper for the registration dialog:
//! 1. Issue and check serials for customer names
//! 2. Build and inspect quick-apply links
//!
//! Usage:
//!   watchdog-keytool generate --name "Jane Doe" --secret s3cret
//!   watchdog-keytool link --bundle Watchdog --name "Jane Doe" --serial ABCD-...

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use watchdog_keytool::{execute, Args};

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let report = execute(&args.command)?;
    for line in &report.lines {
        println!("{line}");
    }

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
