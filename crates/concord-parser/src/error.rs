//! Record-level errors for the codec.
//!
//! Individual record parses report their failure shape through
//! [`RecordError`]; [`decode`](crate::decode) treats every variant as
//! non-fatal and drops only the offending line.

use thiserror::Error;

/// Why a single input line could not be turned into a record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed class record")]
    MalformedClass,

    #[error("malformed relation record")]
    MalformedRelation,
}
