//! Error types for merge pipeline operations.
//!
//! This module provides the main error type [`ConcordError`] which wraps
//! the error conditions that can occur while driving the merge pipeline.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for Concord operations.
///
/// A missing or unreadable input diagram is fatal for the whole run: no
/// merge is computed and no output is written.
#[derive(Debug, Error)]
pub enum ConcordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read input diagram `{}`: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConcordError {
    /// Create a new `Input` error for the given diagram path.
    pub fn new_input_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }
}
