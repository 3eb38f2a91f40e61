//! Staged matching: from a scored pair list to a partial bijection.
//!
//! Three ordered passes run over the score list, each with absolute
//! priority over the next regardless of score:
//!
//! 1. exact-name pairs,
//! 2. pairs whose semantic sub-score reaches the high-confidence bar,
//! 3. pairs whose total reaches the configured threshold.
//!
//! A pair of claimed-index sets is threaded through the passes; within a
//! pass, pairs are visited in descending-total order and the first
//! acceptable pair wins each class. The assignment is greedy by contract,
//! not globally optimal.

use std::collections::HashSet;

use log::debug;

use concord_core::Diagram;

use crate::similarity::{ScoredPair, sort_by_total};

/// Semantic sub-score at which a pair is matched without consulting the
/// total.
pub const HIGH_CONFIDENCE_SEMANTIC: f64 = 0.95;

/// The matcher's output: accepted pairs plus the residual classes of each
/// side.
///
/// Invariant: no two pairs share an A-side or a B-side class. Residuals
/// hold class-list positions, in diagram order.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    pairs: Vec<ScoredPair>,
    unmatched_a: Vec<usize>,
    unmatched_b: Vec<usize>,
}

impl MatchSet {
    /// The accepted pairs, sorted by total, descending.
    pub fn pairs(&self) -> &[ScoredPair] {
        &self.pairs
    }

    /// Positions of A-side classes no pass matched.
    pub fn unmatched_a(&self) -> &[usize] {
        &self.unmatched_a
    }

    /// Positions of B-side classes no pass matched.
    pub fn unmatched_b(&self) -> &[usize] {
        &self.unmatched_b
    }
}

/// Class indices claimed so far, one set per side.
#[derive(Debug, Default)]
struct Claims {
    a: HashSet<usize>,
    b: HashSet<usize>,
}

impl Claims {
    fn is_free(&self, pair: &ScoredPair) -> bool {
        !self.a.contains(&pair.a_index()) && !self.b.contains(&pair.b_index())
    }

    fn claim(&mut self, pair: &ScoredPair) {
        self.a.insert(pair.a_index());
        self.b.insert(pair.b_index());
    }
}

/// One matching pass: accept every eligible pair whose sides are still
/// free, in list order.
fn pass(
    scores: &[ScoredPair],
    claims: &mut Claims,
    accepted: &mut Vec<ScoredPair>,
    eligible: impl Fn(&ScoredPair) -> bool,
) {
    for pair in scores {
        if eligible(pair) && claims.is_free(pair) {
            claims.claim(pair);
            accepted.push(pair.clone());
        }
    }
}

/// Run the three matching passes over the full score list.
///
/// The list is (re-)sorted by total descending before the passes, so ties
/// keep their enumeration order. Matching nothing is a valid outcome; every
/// unclaimed class lands in the residual lists.
pub fn match_classes(
    scores: &[ScoredPair],
    a: &Diagram,
    b: &Diagram,
    threshold: f64,
) -> MatchSet {
    let mut sorted = scores.to_vec();
    sort_by_total(&mut sorted);

    let mut claims = Claims::default();
    let mut pairs = Vec::new();

    pass(&sorted, &mut claims, &mut pairs, |pair| {
        a.classes()[pair.a_index()].name() == b.classes()[pair.b_index()].name()
    });
    let by_name = pairs.len();

    pass(&sorted, &mut claims, &mut pairs, |pair| {
        pair.semantic() >= HIGH_CONFIDENCE_SEMANTIC
    });
    let by_confidence = pairs.len() - by_name;

    pass(&sorted, &mut claims, &mut pairs, |pair| {
        pair.total() >= threshold
    });
    let by_threshold = pairs.len() - by_name - by_confidence;

    debug!(
        by_name,
        by_confidence,
        by_threshold;
        "Matching passes complete"
    );

    sort_by_total(&mut pairs);

    let unmatched_a = (0..a.class_count())
        .filter(|index| !claims.a.contains(index))
        .collect();
    let unmatched_b = (0..b.class_count())
        .filter(|index| !claims.b.contains(index))
        .collect();

    MatchSet {
        pairs,
        unmatched_a,
        unmatched_b,
    }
}
