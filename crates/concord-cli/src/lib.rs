//! CLI logic for the Concord diagram merge tool.
//!
//! This module contains the core CLI logic for the Concord diagram merge
//! tool.

pub mod error_adapter;

mod args;
mod config;
mod report;

pub use args::Args;

use std::fs;

use log::info;

use concord::{ConcordError, MergeBuilder, Origin};

/// Run the Concord CLI application
///
/// This function decodes both input diagrams, runs the merge pipeline,
/// prints the score and match report, and writes the merged diagram to the
/// output file. The output is written in a single step after the whole
/// document is serialized, so a failed run leaves no partial file behind.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ConcordError` for:
/// - Missing or unreadable input diagrams
/// - Configuration loading errors
/// - Output file I/O errors
pub fn run(args: &Args) -> Result<(), ConcordError> {
    info!(
        input_a = args.input_a,
        input_b = args.input_b,
        output_path = args.output;
        "Merging diagrams"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read both input diagrams; either one missing is fatal
    let source_a = read_input(&args.input_a)?;
    let source_b = read_input(&args.input_b)?;

    // Process diagrams using the MergeBuilder API
    let builder = MergeBuilder::new(app_config);
    let a = builder.decode(&source_a, Origin::FromA);
    let b = builder.decode(&source_b, Origin::FromB);

    let outcome = builder.merge(&a, &b);

    report::print_outcome(&outcome, &a, &b);

    // Serialize completely, then write once
    let text = builder.encode(outcome.merged());
    fs::write(&args.output, text)?;

    info!(output_file = args.output; "Merged diagram written");

    Ok(())
}

fn read_input(path: &str) -> Result<String, ConcordError> {
    fs::read_to_string(path).map_err(|source| ConcordError::new_input_error(path, source))
}
