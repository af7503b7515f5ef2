//! Embedding providers - the semantic signal source.
//!
//! The ranking core treats sentence embedding as a pure function from text
//! to a fixed-dimension vector, behind the [`EmbeddingProvider`] trait.
//! Providers are injected into the ranker as constructor dependencies, not
//! reached through global state, so tests substitute deterministic stubs
//! and the serving process initializes real model backends exactly once.
//!
//! Two implementations ship with the crate:
//! - [`HashedEmbedder`]: deterministic hashed-unigram vectors, used by the
//!   CLI and as a realistic lexical provider in tests.
//! - [`CachedEmbedder`]: a bounded LRU wrapper around any provider, keyed
//!   by content hash of (model identity, text).

mod cache;
mod hashed;

pub use cache::{CacheStats, CachedEmbedder};
pub use hashed::HashedEmbedder;

use crate::error::RankError;

/// A sentence-embedding backend.
///
/// Implementations must be deterministic for a fixed model version and
/// produce vectors of a single fixed dimensionality for the lifetime of
/// the provider. `Send + Sync` because ranking calls for different
/// questions run concurrently on a worker pool sharing one provider.
pub trait EmbeddingProvider: Send + Sync {
    /// Stable identifier for the underlying model. Part of the embedding
    /// cache key: vectors from different models must never collide.
    fn model_id(&self) -> &str;

    /// Dimensionality of every vector this provider produces.
    fn dimension(&self) -> usize;

    /// Embed a single text.
    fn encode(&self, text: &str) -> Result<Vec<f32>, RankError>;

    /// Embed a batch of texts, one vector per input in order.
    ///
    /// The default maps `encode` over the slice; backends with real batch
    /// inference should override it.
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RankError> {
        texts.iter().map(|t| self.encode(t)).collect()
    }
}
