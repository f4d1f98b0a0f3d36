//! Command-line interface argument parsing.
//!
//! This module handles CLI argument parsing using clap,
//! including validation and the diagnostic log level.

use clap::Parser;
use std::path::PathBuf;

/// pkg-versions - group `name@version` lines by package
///
/// Reads a file with one `name@version` entry per line and prints one
/// line per package listing every version seen, in first-seen order.
/// The last `@` on a line separates the name from the version, so
/// scoped names such as `@types/node@20.1.0` are kept intact.
///
/// Examples:
///   pkg-versions packages.txt
///   pkg-versions --verbose packages.txt
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File with one `name@version` entry per line
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Log skipped lines and scan statistics to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors to stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
