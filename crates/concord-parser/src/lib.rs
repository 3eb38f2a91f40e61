//! Codec for the Concord class-diagram interchange text format.
//!
//! The format is line oriented: one record per line, fields delimited by
//! `!`, terminated by `;`. Two record shapes are understood:
//!
//! ```text
//! <id>]Class$(x,y)!name!<attr-section>;
//! <id>]ClassRelationLink$<source>!<target>!kind!!line!head!smult!!!tmult!!;
//! ```
//!
//! [`decode`] reads a whole document, dropping malformed records and
//! ignoring unknown ones; [`encode`] writes a [`Diagram`](concord_core::Diagram)
//! back out, deriving the style fields from each relation's kind.

pub mod error;

mod decode;
mod encode;
mod record;

pub use decode::decode;
pub use encode::encode;
pub use error::RecordError;
pub use record::{parse_class_record, parse_relation_record};
