//! Concord - reconciles two revisions of a class diagram into one merged
//! diagram.
//!
//! Decoding, scoring, matching, and merging for diagrams stored in the
//! line-based interchange text format. The pipeline runs Codec → Similarity
//! → Matcher → Merger → Codec; [`MergeBuilder`] drives all of it.

pub mod config;
pub mod matcher;
pub mod merger;
pub mod provider;
pub mod similarity;

mod error;

pub use concord_core::{ClassNode, Diagram, RelationEdge, RelationKind, element::Origin};

pub use error::ConcordError;
pub use matcher::MatchSet;
pub use similarity::ScoredPair;

use log::{debug, info, trace};

use config::AppConfig;
use provider::{CachedProvider, SimilarityProvider, TokenOverlapProvider};

/// Everything one merge run produces: the full score matrix, the match
/// set, and the merged diagram.
#[derive(Debug)]
pub struct MergeOutcome {
    scores: Vec<ScoredPair>,
    matches: MatchSet,
    merged: Diagram,
}

impl MergeOutcome {
    /// Every scored pair, sorted by total, descending.
    pub fn scores(&self) -> &[ScoredPair] {
        &self.scores
    }

    /// The accepted matching and both residual lists.
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    /// The merged diagram.
    pub fn merged(&self) -> &Diagram {
        &self.merged
    }
}

/// Builder for running the Concord merge pipeline.
///
/// # Examples
///
/// ```
/// use concord::{MergeBuilder, Origin, config::AppConfig};
///
/// let builder = MergeBuilder::new(AppConfig::default());
///
/// let a = builder.decode("<1>]Class$(0,0)!Customer!;", Origin::FromA);
/// let b = builder.decode("<1>]Class$(10,0)!Customer!;", Origin::FromB);
///
/// let outcome = builder.merge(&a, &b);
/// assert_eq!(outcome.merged().class_count(), 1);
///
/// let text = builder.encode(outcome.merged());
/// assert!(text.contains("Customer"));
/// ```
pub struct MergeBuilder {
    config: AppConfig,
    provider: CachedProvider,
}

impl Default for MergeBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl MergeBuilder {
    /// Create a builder with the given configuration and the built-in
    /// token-overlap similarity provider.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            provider: CachedProvider::new(Box::new(TokenOverlapProvider)),
        }
    }

    /// Replace the semantic similarity provider (an embedding service,
    /// usually). The provider is wrapped in a cache so repeated text pairs
    /// are only scored once across this builder's lifetime.
    pub fn with_provider(mut self, provider: Box<dyn SimilarityProvider>) -> Self {
        self.provider = CachedProvider::new(provider);
        self
    }

    /// Decode a diagram document, stamping its relations with `origin`.
    pub fn decode(&self, source: &str, origin: Origin) -> Diagram {
        concord_parser::decode(source, origin)
    }

    /// Encode a diagram back to the interchange text format.
    pub fn encode(&self, diagram: &Diagram) -> String {
        concord_parser::encode(diagram)
    }

    /// Score every (class-in-A, class-in-B) pair.
    pub fn score(&self, a: &Diagram, b: &Diagram) -> Vec<ScoredPair> {
        similarity::score_pairs(a, b, self.config.weights(), &self.provider)
    }

    /// Run the full scoring → matching → merging pipeline.
    pub fn merge(&self, a: &Diagram, b: &Diagram) -> MergeOutcome {
        info!(
            classes_a = a.class_count(),
            classes_b = b.class_count();
            "Scoring class pairs"
        );
        let scores = self.score(a, b);
        trace!(pairs = scores.len(); "Score matrix complete");

        let matches = matcher::match_classes(
            &scores,
            a,
            b,
            self.config.matching().threshold(),
        );
        debug!(
            matched = matches.pairs().len(),
            unmatched_a = matches.unmatched_a().len(),
            unmatched_b = matches.unmatched_b().len();
            "Matching complete"
        );

        let merged = merger::merge(&matches, a, b);
        info!(
            classes = merged.class_count(),
            relations = merged.relation_count();
            "Merge complete"
        );

        MergeOutcome {
            scores,
            matches,
            merged,
        }
    }
}
