//! Core types for sentrank - query-focused sentence ranking.
//!
//! Sentences are identified by their 0-based position in the document's
//! sentence sequence; all intermediate values (embeddings, similarity
//! matrices, graphs, score maps) are scoped to a single ranking call and
//! rebuilt fresh every time. Nothing is shared across calls except
//! embeddings, which depend only on sentence text (see `embed::cache`).

use serde::{Deserialize, Serialize};

/// A sentence with its computed relevance score.
///
/// The score is a blend of structural (PageRank) importance and direct
/// query similarity. Ordering is by descending score; on exact score
/// equality the lower document index wins, so ranking is deterministic
/// even when identical embeddings produce identical scores.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSentence {
    /// Blended relevance score (higher = more relevant).
    pub score: f64,
    /// 0-based position in the original document sentence sequence.
    pub index: usize,
    /// The sentence text, unchanged from the input.
    pub text: String,
}

impl RankedSentence {
    pub fn new(score: f64, index: usize, text: String) -> Self {
        Self { score, index, text }
    }
}

impl PartialEq for RankedSentence {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.index == other.index
    }
}

impl Eq for RankedSentence {}

impl PartialOrd for RankedSentence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordering for ranked output: highest score first, ties broken by
/// original document order (lower index first).
impl Ord for RankedSentence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(self.index.cmp(&other.index))
    }
}

/// An answer from the extraction model, with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The extracted answer text.
    pub answer: String,
    /// Model confidence in [0, 1], rounded to 4 decimal places.
    pub confidence: f64,
}

/// One question's result from the QA pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    /// The question that was asked.
    pub question: String,
    /// The extracted answer text.
    pub answer: String,
    /// Model confidence in [0, 1].
    pub confidence: f64,
    /// Top ranked sentences used to build the focused context.
    pub relevant_context: Vec<String>,
}

/// Configuration for the ranking system.
/// All values are tunable at runtime for experimentation.
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Pairwise cosine similarity above which two sentences get a graph
    /// edge (strict comparison). Conservative on purpose: only
    /// semantically close pairs should reinforce each other, otherwise
    /// topic-generic sentences dominate the centrality signal.
    pub similarity_threshold: f64,

    /// PageRank damping factor.
    pub pagerank_alpha: f64,
    /// Convergence tolerance for the power iteration.
    pub pagerank_epsilon: f64,
    /// Iteration cap; hitting it without converging signals
    /// `RankingUnavailable` and triggers the fallback path.
    pub pagerank_max_iterations: usize,

    /// Weight of the structural (PageRank) term in the final score.
    pub structural_weight: f64,
    /// Weight of the direct query-similarity term. Deliberately the
    /// majority share: the system does query-focused extraction, not
    /// generic summarization.
    pub query_weight: f64,

    /// Default number of sentences returned by a ranking call.
    pub top_k: usize,
    /// How many top-ranked sentences form the focused answer context.
    pub context_sentences: usize,

    /// Eviction bound for the embedding cache (entries).
    pub embedding_cache_size: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,

            pagerank_alpha: 0.85,
            pagerank_epsilon: 1e-6,
            pagerank_max_iterations: 200,

            structural_weight: 0.3,
            query_weight: 0.7,

            top_k: 5,
            context_sentences: 3,

            embedding_cache_size: 300,
        }
    }
}
