//! Whole-document encoding.

use std::fmt::Write as _;

use concord_core::{ClassNode, Diagram, RelationEdge, RelationKind, element::NONE_SENTINEL};

/// Encode a diagram back into the interchange text format.
///
/// Classes are written before relations, each in file order. Attribute-less
/// classes use the empty-attribute form; relation style fields are derived
/// from the relation kind.
pub fn encode(diagram: &Diagram) -> String {
    let mut out = String::new();

    for class in diagram.classes() {
        write_class(&mut out, class);
    }
    for relation in diagram.relations() {
        write_relation(&mut out, relation);
    }

    out
}

fn write_class(out: &mut String, class: &ClassNode) {
    let _ = write!(
        out,
        "<{}>]Class$({},{})!{}!",
        class.id(),
        class.x(),
        class.y(),
        class.name()
    );
    if !class.attributes().is_empty() {
        let _ = write!(out, "!-{}%", class.attributes().join("%-"));
    }
    out.push_str(";\n");
}

fn write_relation(out: &mut String, relation: &RelationEdge) {
    let kind = relation.kind().map_or(NONE_SENTINEL, |k| k.as_str());
    let (line_style, head_style) = relation
        .kind()
        .map_or(RelationKind::default_style(), |k| k.style());

    let _ = writeln!(
        out,
        "<{}>]ClassRelationLink$<{}>!<{}>!{}!!{}!{}!{}!!!{}!!;",
        relation.id(),
        relation.source_id(),
        relation.target_id(),
        kind,
        line_style,
        head_style,
        relation.source_multiplicity(),
        relation.target_multiplicity(),
    );
}
