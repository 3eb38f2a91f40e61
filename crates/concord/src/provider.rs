//! The semantic similarity provider seam.
//!
//! The engine treats semantic similarity as an opaque, possibly expensive,
//! synchronous capability. [`SimilarityProvider`] is the seam an embedding
//! service plugs into; [`TokenOverlapProvider`] is the built-in default so
//! the pipeline runs without one; [`CachedProvider`] memoizes so no text
//! pair is ever scored twice, including across pipeline re-entry.

use std::{cell::RefCell, collections::HashMap, collections::HashSet};

/// A source of semantic similarity scores over text snippets.
///
/// Implementations must be symmetric (`similarity(x, y) == similarity(y, x)`),
/// reflexive (`similarity(x, x) == 1.0`), and stay within [0, 1].
pub trait SimilarityProvider {
    /// Score the semantic similarity of two text snippets.
    fn similarity(&self, text_a: &str, text_b: &str) -> f64;
}

/// Built-in provider: Jaccard overlap of whitespace token sets.
///
/// A deterministic stand-in for an embedding model. Two empty texts score
/// 1.0.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenOverlapProvider;

impl SimilarityProvider for TokenOverlapProvider {
    fn similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let tokens_a: HashSet<&str> = text_a.split_whitespace().collect();
        let tokens_b: HashSet<&str> = text_b.split_whitespace().collect();

        if tokens_a.is_empty() && tokens_b.is_empty() {
            return 1.0;
        }

        let intersection = tokens_a.intersection(&tokens_b).count() as f64;
        let union = tokens_a.union(&tokens_b).count() as f64;

        if union == 0.0 { 0.0 } else { intersection / union }
    }
}

/// Caching wrapper around another provider.
///
/// Keys are order-normalized, so the symmetric pair is a single entry. The
/// pipeline is single-threaded, hence the interior mutability.
pub struct CachedProvider {
    inner: Box<dyn SimilarityProvider>,
    cache: RefCell<HashMap<(String, String), f64>>,
}

impl CachedProvider {
    /// Wrap a provider with a memo table.
    pub fn new(inner: Box<dyn SimilarityProvider>) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct pairs scored so far.
    pub fn cached_pairs(&self) -> usize {
        self.cache.borrow().len()
    }

    fn key(text_a: &str, text_b: &str) -> (String, String) {
        if text_a <= text_b {
            (text_a.to_string(), text_b.to_string())
        } else {
            (text_b.to_string(), text_a.to_string())
        }
    }
}

impl SimilarityProvider for CachedProvider {
    fn similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let key = Self::key(text_a, text_b);
        if let Some(&score) = self.cache.borrow().get(&key) {
            return score;
        }

        let score = self.inner.similarity(text_a, text_b);
        self.cache.borrow_mut().insert(key, score);
        score
    }
}
