//! Configuration types for the merge engine.
//!
//! This module provides the configuration structures that control scoring
//! and matching. All types implement [`serde::Deserialize`] for flexible
//! loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining weight and matching settings.
//! - [`Weights`] - Per-factor weights for the combined similarity score.
//! - [`MatchingConfig`] - Acceptance threshold for the final matching pass.

use serde::Deserialize;

/// Top-level engine configuration combining weight and matching settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Similarity weight section.
    #[serde(default)]
    weights: Weights,

    /// Matching section.
    #[serde(default)]
    matching: MatchingConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from the specified sections.
    pub fn new(weights: Weights, matching: MatchingConfig) -> Self {
        Self { weights, matching }
    }

    /// Returns the similarity weights.
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Returns the matching configuration.
    pub fn matching(&self) -> &MatchingConfig {
        &self.matching
    }
}

/// Per-factor weights for the combined similarity score.
///
/// The total is a plain weighted sum; it is accepted as-is without
/// renormalizing, and a factor weighted 0 still produces a defined
/// sub-score. The defaults emphasize the semantic factor.
#[derive(Debug, Clone, Deserialize)]
pub struct Weights {
    #[serde(default = "Weights::default_semantic")]
    semantic: f64,

    #[serde(default = "Weights::default_structural")]
    structural: f64,

    #[serde(default = "Weights::default_spatial")]
    spatial: f64,

    #[serde(default = "Weights::default_relational")]
    relational: f64,
}

impl Weights {
    fn default_semantic() -> f64 {
        0.7
    }

    fn default_structural() -> f64 {
        0.15
    }

    fn default_spatial() -> f64 {
        0.15
    }

    fn default_relational() -> f64 {
        0.0
    }

    /// Creates a new [`Weights`] with explicit per-factor weights.
    pub fn new(semantic: f64, structural: f64, spatial: f64, relational: f64) -> Self {
        Self {
            semantic,
            structural,
            spatial,
            relational,
        }
    }

    /// Weight of the semantic factor.
    pub fn semantic(&self) -> f64 {
        self.semantic
    }

    /// Weight of the structural factor.
    pub fn structural(&self) -> f64 {
        self.structural
    }

    /// Weight of the spatial factor.
    pub fn spatial(&self) -> f64 {
        self.spatial
    }

    /// Weight of the relational factor.
    pub fn relational(&self) -> f64 {
        self.relational
    }

    /// Combine the four sub-scores into a total.
    pub fn combine(&self, semantic: f64, structural: f64, spatial: f64, relational: f64) -> f64 {
        semantic * self.semantic
            + structural * self.structural
            + spatial * self.spatial
            + relational * self.relational
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            semantic: Self::default_semantic(),
            structural: Self::default_structural(),
            spatial: Self::default_spatial(),
            relational: Self::default_relational(),
        }
    }
}

/// Acceptance settings for the final matching pass.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Minimum total score for the threshold pass.
    #[serde(default = "MatchingConfig::default_threshold")]
    threshold: f64,
}

impl MatchingConfig {
    fn default_threshold() -> f64 {
        0.6
    }

    /// Creates a new [`MatchingConfig`] with the given threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Minimum total score accepted by the threshold pass.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
        }
    }
}
