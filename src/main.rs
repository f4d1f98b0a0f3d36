//! pkg-versions - group `name@version` lines by package
//!
//! Reads a newline-delimited list of `name@version` entries and prints
//! one `name (v1, v2, ...)` line per package, in first-seen order.
//!
//! Exit codes:
//!   0 - Success (including an empty input)
//!   1 - The input could not be read, or stdout could not be written
//!   2 - Invalid command-line usage

mod analysis;
mod cli;
mod error;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use std::io::{self, BufWriter, Write};
use tracing::{debug, error};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Initialize logging
    init_logging(&args);

    debug!("pkg-versions v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Run failed: {:#}", e);
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity settings.
///
/// Diagnostics go to stderr; stdout carries only the report.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Aggregate the input file and print the summary to stdout.
///
/// Nothing is written until the whole input has been read, so a read
/// failure leaves stdout empty.
fn run(args: &Args) -> Result<()> {
    let aggregation = analysis::aggregate_file(&args.input)?;
    if aggregation.packages.is_empty() {
        debug!("No package entries in {}", args.input.display());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    report::write_report(&aggregation.packages, &mut out)
        .context("Failed to write summary to stdout")?;
    out.flush().context("Failed to flush stdout")?;

    Ok(())
}
