//! Error adapter for converting ConcordError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. Concord
//! errors carry no source spans, so the adapter only supplies stable error
//! codes and the error chain.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use concord::ConcordError;

/// Adapter wrapping a [`ConcordError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a ConcordError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ConcordError::Io(_) => "concord::io",
            ConcordError::Input { .. } => "concord::input",
            ConcordError::Config(_) => "concord::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ConcordError::Input { .. } => {
                Some(Box::new("both input diagram files must exist and be readable"))
            }
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`ConcordError`] for rendering.
pub fn to_reportable(err: &ConcordError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
