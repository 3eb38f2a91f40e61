//! Pairwise similarity scoring between classes of two diagrams.
//!
//! Four independent factors are computed for every (class-in-A, class-in-B)
//! pair and combined with configured weights:
//!
//! - **semantic** — delegated to the [`SimilarityProvider`] over each
//!   class's name-plus-attributes text,
//! - **structural** — agreement of outgoing/incoming relation counts,
//! - **spatial** — greedy nearest-neighbor comparison of relative-position
//!   signatures,
//! - **relational** — greedy comparison of the touching relations' kinds
//!   and multiplicities.
//!
//! All factors stay within [0, 1]; 0/0 situations are defined values, not
//! errors.

use std::cmp::Ordering;

use log::trace;

use concord_core::{ClassNode, Diagram, RelationEdge, RelationKind};

use crate::config::Weights;
use crate::provider::SimilarityProvider;

/// One scored (class-in-A, class-in-B) pair.
///
/// Carries the combined total, the four sub-scores, and the positions of
/// both classes in their diagrams' class lists.
#[derive(Debug, Clone)]
pub struct ScoredPair {
    total: f64,
    semantic: f64,
    structural: f64,
    spatial: f64,
    relational: f64,
    a_index: usize,
    b_index: usize,
}

impl ScoredPair {
    /// Create a scored pair from its parts.
    pub fn new(
        total: f64,
        semantic: f64,
        structural: f64,
        spatial: f64,
        relational: f64,
        a_index: usize,
        b_index: usize,
    ) -> Self {
        Self {
            total,
            semantic,
            structural,
            spatial,
            relational,
            a_index,
            b_index,
        }
    }

    /// The combined weighted score.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// The semantic sub-score.
    pub fn semantic(&self) -> f64 {
        self.semantic
    }

    /// The structural sub-score.
    pub fn structural(&self) -> f64 {
        self.structural
    }

    /// The spatial sub-score.
    pub fn spatial(&self) -> f64 {
        self.spatial
    }

    /// The relational sub-score.
    pub fn relational(&self) -> f64 {
        self.relational
    }

    /// Position of the A-side class in diagram A's class list.
    pub fn a_index(&self) -> usize {
        self.a_index
    }

    /// Position of the B-side class in diagram B's class list.
    pub fn b_index(&self) -> usize {
        self.b_index
    }
}

/// Sort scored pairs by total, descending.
///
/// The sort is stable: ties keep the A-major, B-minor enumeration order of
/// the scoring loop, which is the documented tie-break for the downstream
/// greedy matching.
pub fn sort_by_total(scores: &mut [ScoredPair]) {
    scores.sort_by(|left, right| {
        right
            .total
            .partial_cmp(&left.total)
            .unwrap_or(Ordering::Equal)
    });
}

/// Score every (class-in-A, class-in-B) pair.
///
/// Each class's semantic text is assembled once per diagram before the
/// pairwise loop; callers wanting provider batching wrap the provider in
/// [`CachedProvider`](crate::provider::CachedProvider). The returned list
/// is sorted with [`sort_by_total`].
pub fn score_pairs(
    a: &Diagram,
    b: &Diagram,
    weights: &Weights,
    provider: &dyn SimilarityProvider,
) -> Vec<ScoredPair> {
    let texts_a: Vec<String> = a.classes().iter().map(ClassNode::semantic_text).collect();
    let texts_b: Vec<String> = b.classes().iter().map(ClassNode::semantic_text).collect();

    let mut scores = Vec::with_capacity(a.class_count() * b.class_count());
    for (a_index, class_a) in a.classes().iter().enumerate() {
        for (b_index, class_b) in b.classes().iter().enumerate() {
            let semantic = provider.similarity(&texts_a[a_index], &texts_b[b_index]);
            let structural = structural_similarity(class_a, a, class_b, b);
            let spatial = spatial_similarity(class_a, a, class_b, b);
            let relational = relational_similarity(class_a, a, class_b, b);
            let total = weights.combine(semantic, structural, spatial, relational);

            trace!(
                class_a = class_a.name(),
                class_b = class_b.name(),
                total,
                semantic,
                structural,
                spatial,
                relational;
                "Scored pair"
            );

            scores.push(ScoredPair::new(
                total, semantic, structural, spatial, relational, a_index, b_index,
            ));
        }
    }

    sort_by_total(&mut scores);
    scores
}

/// Agreement of relation counts at both ends.
///
/// Out-degree and in-degree differences are normalized against the combined
/// degree (floored at 1, so two isolated classes agree perfectly).
pub fn structural_similarity(
    class_a: &ClassNode,
    diagram_a: &Diagram,
    class_b: &ClassNode,
    diagram_b: &Diagram,
) -> f64 {
    let out_a = diagram_a.relations_from(class_a.id()).count() as f64;
    let out_b = diagram_b.relations_from(class_b.id()).count() as f64;
    let in_a = diagram_a.relations_into(class_a.id()).count() as f64;
    let in_b = diagram_b.relations_into(class_b.id()).count() as f64;

    let diff_out = (out_a - out_b).abs() / f64::max(1.0, out_a + out_b);
    let diff_in = (in_a - in_b).abs() / f64::max(1.0, in_a + in_b);

    1.0 - (diff_out + diff_in) / 2.0
}

/// Relative-position signature: displacement vectors to every connected
/// neighbor, sorted lexicographically for a deterministic greedy walk.
/// Dangling endpoints contribute nothing.
fn spatial_signature(class: &ClassNode, diagram: &Diagram) -> Vec<(i32, i32)> {
    let mut signature = Vec::new();

    for relation in diagram.relations() {
        let neighbor_id = if relation.source_id() == class.id() {
            relation.target_id()
        } else if relation.target_id() == class.id() {
            relation.source_id()
        } else {
            continue;
        };

        if let Some(neighbor) = diagram.class_by_id(neighbor_id) {
            signature.push((neighbor.x() - class.x(), neighbor.y() - class.y()));
        }
    }

    signature.sort_unstable();
    signature
}

fn vector_distance(left: (i32, i32), right: (i32, i32)) -> f64 {
    let dx = f64::from(left.0 - right.0);
    let dy = f64::from(left.1 - right.1);
    (dx * dx + dy * dy).sqrt()
}

/// Penalty for comparing signatures (or relation lists) of unequal length.
/// Callers guarantee at least one side is non-empty.
fn length_penalty(len_a: usize, len_b: usize) -> f64 {
    1.0 - (len_a as f64 - len_b as f64).abs() / (len_a.max(len_b) as f64)
}

/// Compare two spatial signatures by greedy nearest-neighbor matching.
///
/// Every vector of A claims its closest unclaimed vector of B; the average
/// claimed distance converts to a similarity which is then scaled by the
/// length-mismatch penalty. Two empty signatures are identical (1.0); one
/// empty signature is maximally different (0.0).
fn compare_signatures(signature_a: &[(i32, i32)], signature_b: &[(i32, i32)]) -> f64 {
    if signature_a.is_empty() && signature_b.is_empty() {
        return 1.0;
    }
    if signature_a.is_empty() || signature_b.is_empty() {
        return 0.0;
    }

    let mut claimed = vec![false; signature_b.len()];
    let mut total_distance = 0.0;

    for vector_a in signature_a {
        let mut best: Option<(usize, f64)> = None;
        for (index, vector_b) in signature_b.iter().enumerate() {
            if claimed[index] {
                continue;
            }
            let distance = vector_distance(*vector_a, *vector_b);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }
        if let Some((index, distance)) = best {
            claimed[index] = true;
            total_distance += distance;
        }
    }

    let average = total_distance / signature_a.len() as f64;
    let similarity = 1.0 / (1.0 + average / 100.0);
    similarity * length_penalty(signature_a.len(), signature_b.len())
}

/// Spatial similarity of two classes via their neighborhood signatures.
pub fn spatial_similarity(
    class_a: &ClassNode,
    diagram_a: &Diagram,
    class_b: &ClassNode,
    diagram_b: &Diagram,
) -> f64 {
    compare_signatures(
        &spatial_signature(class_a, diagram_a),
        &spatial_signature(class_b, diagram_b),
    )
}

/// Compatibility of two relation kinds.
///
/// Identical kinds (including two absent kinds) are fully compatible.
/// Otherwise the fixed table is consulted directly and then reversed;
/// anything not listed is incompatible.
fn kind_compatibility(kind_a: Option<RelationKind>, kind_b: Option<RelationKind>) -> f64 {
    if kind_a == kind_b {
        return 1.0;
    }
    match (kind_a, kind_b) {
        (Some(a), Some(b)) => table_lookup(a, b)
            .or_else(|| table_lookup(b, a))
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

fn table_lookup(from: RelationKind, to: RelationKind) -> Option<f64> {
    use RelationKind::*;

    let score = match (from, to) {
        (Composition, Aggregation) => 0.8,
        (Composition, Association) => 0.5,
        (Aggregation, Composition) => 0.8,
        (Aggregation, Association) => 0.6,
        (Association, Composition) => 0.5,
        (Association, Aggregation) => 0.6,
        (Association, SimpleRelation) => 0.4,
        (Generalization, Realization) => 0.7,
        (Realization, Generalization) => 0.7,
        _ => return None,
    };
    Some(score)
}

fn multiplicity_match(left: &str, right: &str) -> f64 {
    if left == right { 1.0 } else { 0.0 }
}

/// Score one relation of A against one relation of B.
fn relation_pair_score(relation_a: &RelationEdge, relation_b: &RelationEdge) -> f64 {
    let kind = kind_compatibility(relation_a.kind(), relation_b.kind());
    let source = multiplicity_match(
        relation_a.source_multiplicity(),
        relation_b.source_multiplicity(),
    );
    let target = multiplicity_match(
        relation_a.target_multiplicity(),
        relation_b.target_multiplicity(),
    );

    0.6 * kind + 0.4 * ((source + target) / 2.0)
}

/// Relational similarity: greedy best-match over the relations touching
/// each class.
///
/// Two untouched classes are fully similar (1.0); one untouched class is
/// fully dissimilar (0.0). Otherwise each relation of A claims the
/// best-scoring unclaimed relation of B (first maximum wins), the claimed
/// scores are averaged over A's relations, and the length-mismatch penalty
/// applies.
pub fn relational_similarity(
    class_a: &ClassNode,
    diagram_a: &Diagram,
    class_b: &ClassNode,
    diagram_b: &Diagram,
) -> f64 {
    let relations_a: Vec<&RelationEdge> = diagram_a.relations_touching(class_a.id()).collect();
    let relations_b: Vec<&RelationEdge> = diagram_b.relations_touching(class_b.id()).collect();

    if relations_a.is_empty() && relations_b.is_empty() {
        return 1.0;
    }
    if relations_a.is_empty() || relations_b.is_empty() {
        return 0.0;
    }

    let mut claimed = vec![false; relations_b.len()];
    let mut total = 0.0;

    for relation_a in &relations_a {
        let mut best: Option<(usize, f64)> = None;
        for (index, relation_b) in relations_b.iter().enumerate() {
            if claimed[index] {
                continue;
            }
            let score = relation_pair_score(relation_a, relation_b);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }
        if let Some((index, score)) = best {
            claimed[index] = true;
            total += score;
        }
    }

    let average = total / relations_a.len() as f64;
    average * length_penalty(relations_a.len(), relations_b.len())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use concord_core::element::Origin;

    use crate::provider::TokenOverlapProvider;

    use super::*;

    fn class(id: &str, name: &str, x: i32, y: i32) -> ClassNode {
        ClassNode::new(id, name, vec![], x, y)
    }

    fn edge(id: &str, source: &str, target: &str, kind: Option<RelationKind>) -> RelationEdge {
        RelationEdge::new(id, source, target, kind, "1", "0..*", Origin::FromA)
    }

    #[test]
    fn structural_matches_degree_formula() {
        // A: out 2, in 0. B: out 1, in 1.
        let a = Diagram::new(
            vec![class("1", "X", 0, 0), class("2", "Y", 0, 0), class("3", "Z", 0, 0)],
            vec![edge("1", "1", "2", None), edge("2", "1", "3", None)],
        );
        let b = Diagram::new(
            vec![class("1", "X", 0, 0), class("2", "Y", 0, 0)],
            vec![edge("1", "1", "2", None), edge("2", "2", "1", None)],
        );

        let score = structural_similarity(&a.classes()[0], &a, &b.classes()[0], &b);
        // diff_out = |2-1|/3, diff_in = |0-1|/1.
        assert_approx_eq!(f64, score, 1.0 - (1.0 / 3.0 + 1.0) / 2.0);
    }

    #[test]
    fn structural_is_symmetric() {
        let a = Diagram::new(
            vec![class("1", "X", 0, 0), class("2", "Y", 0, 0)],
            vec![edge("1", "1", "2", None)],
        );
        let b = Diagram::new(vec![class("1", "X", 0, 0)], vec![]);

        let forward = structural_similarity(&a.classes()[0], &a, &b.classes()[0], &b);
        let backward = structural_similarity(&b.classes()[0], &b, &a.classes()[0], &a);
        assert_approx_eq!(f64, forward, backward);
    }

    #[test]
    fn isolated_classes_are_structurally_identical() {
        let a = Diagram::new(vec![class("1", "X", 0, 0)], vec![]);
        let b = Diagram::new(vec![class("1", "Y", 5, 5)], vec![]);
        let score = structural_similarity(&a.classes()[0], &a, &b.classes()[0], &b);
        assert_approx_eq!(f64, score, 1.0);
    }

    #[test]
    fn empty_signatures_score_one() {
        let a = Diagram::new(vec![class("1", "X", 0, 0)], vec![]);
        let b = Diagram::new(vec![class("1", "Y", 9, 9)], vec![]);
        assert_approx_eq!(
            f64,
            spatial_similarity(&a.classes()[0], &a, &b.classes()[0], &b),
            1.0
        );
        assert_approx_eq!(
            f64,
            relational_similarity(&a.classes()[0], &a, &b.classes()[0], &b),
            1.0
        );
    }

    #[test]
    fn one_empty_signature_scores_zero() {
        let a = Diagram::new(
            vec![class("1", "X", 0, 0), class("2", "Y", 10, 0)],
            vec![edge("1", "1", "2", None)],
        );
        let b = Diagram::new(vec![class("1", "X", 0, 0)], vec![]);

        assert_approx_eq!(
            f64,
            spatial_similarity(&a.classes()[0], &a, &b.classes()[0], &b),
            0.0
        );
        assert_approx_eq!(
            f64,
            relational_similarity(&a.classes()[0], &a, &b.classes()[0], &b),
            0.0
        );
    }

    #[test]
    fn identical_neighborhoods_score_one_spatially() {
        let build = |origin_x: i32| {
            Diagram::new(
                vec![
                    class("1", "X", origin_x, 0),
                    class("2", "Y", origin_x + 50, 0),
                    class("3", "Z", origin_x, 80),
                ],
                vec![edge("1", "1", "2", None), edge("2", "3", "1", None)],
            )
        };
        let a = build(0);
        let b = build(300); // same shape, translated

        assert_approx_eq!(
            f64,
            spatial_similarity(&a.classes()[0], &a, &b.classes()[0], &b),
            1.0
        );
    }

    #[test]
    fn dangling_neighbors_are_skipped_in_signatures() {
        let a = Diagram::new(
            vec![class("1", "X", 0, 0)],
            vec![edge("1", "1", "99", None)],
        );
        let b = Diagram::new(vec![class("1", "X", 0, 0)], vec![]);

        // The only relation dangles, so the signature is empty on both sides.
        assert_approx_eq!(
            f64,
            spatial_similarity(&a.classes()[0], &a, &b.classes()[0], &b),
            1.0
        );
    }

    #[test]
    fn kind_compatibility_uses_the_fixed_table() {
        use RelationKind::*;

        assert_approx_eq!(f64, kind_compatibility(Some(Composition), Some(Composition)), 1.0);
        assert_approx_eq!(f64, kind_compatibility(None, None), 1.0);
        assert_approx_eq!(f64, kind_compatibility(Some(Composition), Some(Aggregation)), 0.8);
        assert_approx_eq!(f64, kind_compatibility(Some(Aggregation), Some(Association)), 0.6);
        // Only listed one way; the reversed lookup must find it.
        assert_approx_eq!(f64, kind_compatibility(Some(SimpleRelation), Some(Association)), 0.4);
        assert_approx_eq!(f64, kind_compatibility(Some(Generalization), Some(Realization)), 0.7);
        assert_approx_eq!(f64, kind_compatibility(Some(Dependency), Some(Composition)), 0.0);
        assert_approx_eq!(f64, kind_compatibility(Some(Dependency), None), 0.0);
    }

    #[test]
    fn relational_blends_kind_and_multiplicities() {
        let a = Diagram::new(
            vec![class("1", "X", 0, 0), class("2", "Y", 0, 0)],
            vec![edge("1", "1", "2", Some(RelationKind::Composition))],
        );
        let b = Diagram::new(
            vec![class("1", "X", 0, 0), class("2", "Y", 0, 0)],
            vec![edge("1", "1", "2", Some(RelationKind::Aggregation))],
        );

        // Same multiplicities on both edges: 0.6 * 0.8 + 0.4 * 1.0.
        let score = relational_similarity(&a.classes()[0], &a, &b.classes()[0], &b);
        assert_approx_eq!(f64, score, 0.88);
    }

    #[test]
    fn relational_is_symmetric_for_mirrored_diagrams() {
        let build = || {
            Diagram::new(
                vec![class("1", "X", 0, 0), class("2", "Y", 0, 0), class("3", "Z", 0, 0)],
                vec![
                    edge("1", "1", "2", Some(RelationKind::Association)),
                    edge("2", "3", "1", Some(RelationKind::Generalization)),
                ],
            )
        };
        let a = build();
        let b = build();

        let forward = relational_similarity(&a.classes()[0], &a, &b.classes()[0], &b);
        let backward = relational_similarity(&b.classes()[0], &b, &a.classes()[0], &a);
        assert_approx_eq!(f64, forward, backward);
        assert_approx_eq!(f64, forward, 1.0);
    }

    #[test]
    fn score_pairs_is_sorted_descending() {
        let a = Diagram::new(
            vec![class("1", "Customer", 0, 0), class("2", "Invoice", 0, 0)],
            vec![],
        );
        let b = Diagram::new(vec![class("1", "Customer", 0, 0)], vec![]);

        let scores = score_pairs(&a, &b, &Weights::default(), &TokenOverlapProvider);
        assert_eq!(scores.len(), 2);
        assert!(scores[0].total() >= scores[1].total());
        assert_eq!(scores[0].a_index(), 0);
    }

    fn arb_diagram() -> impl Strategy<Value = Diagram> {
        let classes = prop::collection::vec(
            ("[A-Z][a-z]{0,6}", -200i32..200, -200i32..200),
            1..5,
        );
        let relations = prop::collection::vec(
            (
                1usize..6,
                1usize..6,
                proptest::option::of(prop_oneof![
                    Just(RelationKind::Generalization),
                    Just(RelationKind::Aggregation),
                    Just(RelationKind::Composition),
                    Just(RelationKind::Association),
                ]),
            ),
            0..6,
        );

        (classes, relations).prop_map(|(classes, relations)| {
            let mut diagram = Diagram::default();
            for (index, (name, x, y)) in classes.into_iter().enumerate() {
                diagram.push_class(ClassNode::new((index + 1).to_string(), name, vec![], x, y));
            }
            for (index, (source, target, kind)) in relations.into_iter().enumerate() {
                diagram.push_relation(RelationEdge::new(
                    (index + 1).to_string(),
                    source.to_string(),
                    target.to_string(),
                    kind,
                    "1",
                    "0..*",
                    Origin::FromA,
                ));
            }
            diagram
        })
    }

    proptest! {
        #[test]
        fn all_scores_stay_in_unit_interval(a in arb_diagram(), b in arb_diagram()) {
            let scores = score_pairs(&a, &b, &Weights::default(), &TokenOverlapProvider);
            for pair in scores {
                for value in [
                    pair.total(),
                    pair.semantic(),
                    pair.structural(),
                    pair.spatial(),
                    pair.relational(),
                ] {
                    prop_assert!((0.0..=1.0).contains(&value));
                }
            }
        }
    }
}
