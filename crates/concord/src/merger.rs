//! Building the merged diagram from a match set.
//!
//! Matched pairs become unified classes; residual classes are copied
//! through; relations are remapped through per-side provenance maps and
//! deduplicated on their (order-independent) endpoint pair. The merged
//! diagram gets a fresh id space counting from 1.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use concord_core::{ClassNode, Diagram, RelationEdge, element::Origin};

use crate::matcher::MatchSet;

/// Original-id to merged-id mapping for one input side.
type ProvenanceMap = IndexMap<String, String>;

/// Merge the two diagrams according to the match set.
///
/// Merged classes are emitted matched pairs first (best total first), then
/// A-side residuals, then B-side residuals. A matched pair takes the A
/// side's name, the sorted deduplicated union of both attribute lists, and
/// the integer-truncated midpoint of both positions. Relations whose
/// endpoints both resolve through their side's provenance map survive;
/// duplicates of an already-emitted endpoint pair (in either direction) are
/// dropped, first occurrence winning.
pub fn merge(matches: &MatchSet, a: &Diagram, b: &Diagram) -> Diagram {
    let mut merged = Diagram::default();
    let mut map_a = ProvenanceMap::new();
    let mut map_b = ProvenanceMap::new();
    let mut next_id = 1usize;

    for pair in matches.pairs() {
        let class_a = &a.classes()[pair.a_index()];
        let class_b = &b.classes()[pair.b_index()];

        let mut attributes: Vec<String> = class_a
            .attributes()
            .iter()
            .chain(class_b.attributes())
            .cloned()
            .collect();
        attributes.sort();
        attributes.dedup();

        let id = next_id.to_string();
        map_a.insert(class_a.id().to_string(), id.clone());
        map_b.insert(class_b.id().to_string(), id.clone());
        merged.push_class(ClassNode::new(
            id,
            class_a.name(),
            attributes,
            (class_a.x() + class_b.x()) / 2,
            (class_a.y() + class_b.y()) / 2,
        ));
        next_id += 1;
    }

    for (residuals, source, map) in [
        (matches.unmatched_a(), a, &mut map_a),
        (matches.unmatched_b(), b, &mut map_b),
    ] {
        for &index in residuals {
            let class = &source.classes()[index];
            let id = next_id.to_string();
            map.insert(class.id().to_string(), id.clone());
            merged.push_class(ClassNode::new(
                id,
                class.name(),
                class.attributes().to_vec(),
                class.x(),
                class.y(),
            ));
            next_id += 1;
        }
    }

    let mut emitted: HashSet<(String, String)> = HashSet::new();
    let mut dropped = 0usize;

    for relation in a.relations().iter().chain(b.relations()) {
        let map = match relation.origin() {
            Origin::FromA => &map_a,
            Origin::FromB => &map_b,
        };

        let (Some(source), Some(target)) = (
            map.get(relation.source_id()),
            map.get(relation.target_id()),
        ) else {
            // Dangling or unmapped endpoint: the relation dies quietly.
            dropped += 1;
            continue;
        };

        let key = if source <= target {
            (source.clone(), target.clone())
        } else {
            (target.clone(), source.clone())
        };
        if !emitted.insert(key) {
            continue;
        }

        let id = (merged.relation_count() + 1).to_string();
        merged.push_relation(RelationEdge::new(
            id,
            source.clone(),
            target.clone(),
            relation.kind(),
            relation.source_multiplicity(),
            relation.target_multiplicity(),
            relation.origin(),
        ));
    }

    debug!(
        classes = merged.class_count(),
        relations = merged.relation_count(),
        dropped;
        "Merged diagram built"
    );

    merged
}
