//! Command-line argument definitions for the Concord CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the two input diagram paths, the
//! output path, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Concord diagram merge tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to revision A of the diagram
    #[arg(help = "Path to revision A of the diagram")]
    pub input_a: String,

    /// Path to revision B of the diagram
    #[arg(help = "Path to revision B of the diagram")]
    pub input_b: String,

    /// Path to the merged output file
    #[arg(short, long, default_value = "merged.txt")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
