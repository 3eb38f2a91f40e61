//! Whole-document decoding.

use log::{debug, warn};

use concord_core::{Diagram, element::Origin};

use crate::record::{parse_class_record, parse_relation_record};

/// Decode a diagram document.
///
/// Reads the source line by line, skipping blank lines. Lines matching the
/// class or relation grammar become records; every relation is stamped with
/// `origin`. Lines carrying a known record marker that fail to parse are
/// dropped with a warning; lines matching neither grammar are ignored for
/// forward compatibility with unknown record kinds.
///
/// Decoding never fails at the document level. Reading the document from
/// disk, and thus reporting a missing file, is the caller's concern.
pub fn decode(source: &str, origin: Origin) -> Diagram {
    let mut diagram = Diagram::default();

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Ok(class) = parse_class_record(line) {
            diagram.push_class(class);
            continue;
        }

        if let Ok(relation) = parse_relation_record(line, origin) {
            diagram.push_relation(relation);
            continue;
        }

        let line_number = index + 1;
        if line.contains("]Class$") || line.contains("]ClassRelationLink$") {
            warn!(line_number; "Dropping malformed record");
        } else {
            debug!(line_number; "Ignoring unrecognized record");
        }
    }

    debug!(
        classes = diagram.class_count(),
        relations = diagram.relation_count();
        "Document decoded"
    );

    diagram
}
