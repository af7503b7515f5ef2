//! Deterministic hashed-unigram embedder.
//!
//! Tokenizes on non-alphanumeric boundaries, lowercases, and hashes each
//! token into a fixed-dimension bucket (the hashing trick). The resulting
//! bag-of-words vector is L2-normalized, so cosine similarity between two
//! texts reduces to their token-overlap ratio.
//!
//! This is not a semantic model. It exists so the CLI works offline and
//! tests have a deterministic provider with realistic lexical behavior;
//! production deployments inject a real sentence-transformer backend.

use xxhash_rust::xxh64::xxh64;

use crate::error::RankError;

use super::EmbeddingProvider;

/// Default vector dimensionality. Small enough to be cheap, large enough
/// that unrelated token sets rarely collide into the same buckets.
pub const DEFAULT_DIMENSION: usize = 256;

/// Hashed bag-of-words embedding provider.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dimension: usize,
}

impl HashedEmbedder {
    /// Create an embedder with the default dimension.
    pub fn new() -> Self {
        Self::with_dimension(DEFAULT_DIMENSION)
    }

    /// Create an embedder with a custom dimension (must be non-zero).
    pub fn with_dimension(dimension: usize) -> Self {
        assert!(dimension > 0, "embedding dimension must be non-zero");
        Self { dimension }
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingProvider for HashedEmbedder {
    fn model_id(&self) -> &str {
        "hashed-unigram-v1"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, RankError> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            let bucket = (xxh64(token.as_bytes(), 0) % self.dimension as u64) as usize;
            vector[bucket] += 1.0;
        }

        // L2-normalize so cosine similarity is a pure overlap measure.
        // A text with no tokens stays the zero vector; similarity code
        // treats zero-magnitude vectors as similarity 0.
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }

        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_deterministic() {
        let embedder = HashedEmbedder::new();
        let a = embedder.encode("The cat sat on the mat.").unwrap();
        let b = embedder.encode("The cat sat on the mat.").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unit_norm() {
        let embedder = HashedEmbedder::new();
        let v = embedder.encode("stock markets fell today").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashedEmbedder::new();
        let v = embedder.encode("   ").unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
        assert_eq!(v.len(), DEFAULT_DIMENSION);
    }

    #[test]
    fn test_shared_tokens_raise_similarity() {
        let embedder = HashedEmbedder::new();
        let base = embedder.encode("cats are small mammals").unwrap();
        let related = embedder.encode("mammals are warm blooded").unwrap();
        let unrelated = embedder.encode("stock markets fell today").unwrap();

        // "are" and "mammals" overlap; the market sentence shares nothing
        assert!(cosine(&base, &related) > cosine(&base, &unrelated));
        assert!(cosine(&base, &unrelated).abs() < 1e-5);
    }

    #[test]
    fn test_case_insensitive_tokens() {
        let embedder = HashedEmbedder::new();
        let lower = embedder.encode("cats").unwrap();
        let upper = embedder.encode("CATS").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_batch_matches_single() {
        let embedder = HashedEmbedder::new();
        let texts = vec!["one two".to_string(), "three four".to_string()];
        let batch = embedder.encode_batch(&texts).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.encode("one two").unwrap());
        assert_eq!(batch[1], embedder.encode("three four").unwrap());
    }
}
