//! Cosine similarity and the pairwise similarity matrix.
//!
//! All vectors in one ranking call must share a dimensionality; a mismatch
//! is a caller bug and surfaces as `DimensionMismatch` rather than being
//! absorbed by the fallback path. Zero-magnitude vectors (an empty
//! sentence through a bag-of-words provider, say) get similarity 0.0 so
//! no NaN ever enters the graph.

use crate::error::RankError;

/// Cosine similarity of two equal-length vectors, in [-1, 1].
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Symmetric N×N matrix of pairwise sentence similarities.
///
/// The diagonal is stored as 1.0 but never read: self-similarity plays no
/// role in graph construction.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of sentences (rows/columns).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between sentences `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.n + j] = value;
        self.data[j * self.n + i] = value;
    }
}

/// Compute the pairwise similarity matrix and the query-similarity vector
/// for one ranking call.
///
/// Validates that every sentence embedding matches the query embedding's
/// dimensionality; a mismatch is a contract violation and propagates.
pub fn build_similarity(
    query_embedding: &[f32],
    sentence_embeddings: &[Vec<f32>],
) -> Result<(SimilarityMatrix, Vec<f64>), RankError> {
    let dim = query_embedding.len();
    for embedding in sentence_embeddings {
        if embedding.len() != dim {
            return Err(RankError::DimensionMismatch {
                expected: dim,
                actual: embedding.len(),
            });
        }
    }

    let n = sentence_embeddings.len();
    let mut matrix = SimilarityMatrix {
        n,
        data: vec![0.0; n * n],
    };
    for i in 0..n {
        matrix.set(i, i, 1.0);
        for j in (i + 1)..n {
            let sim = cosine_similarity(&sentence_embeddings[i], &sentence_embeddings[j]);
            matrix.set(i, j, sim);
        }
    }

    let query_similarities = sentence_embeddings
        .iter()
        .map(|embedding| cosine_similarity(query_embedding, embedding))
        .collect();

    Ok((matrix, query_similarities))
}
