//! Ranking pipeline - from sentences and a query to a relevance order.
//!
//! The pipeline combines two signals under a fixed policy:
//! - Structural: weighted PageRank over a similarity graph, rewarding
//!   sentences corroborated by semantically close neighbors
//! - Semantic: direct cosine similarity between query and sentence
//!
//! Stages: similarity matrix → relevance graph → PageRank → blend →
//! top-k selection, with original-order fallback on any recoverable
//! failure.

mod graph;
mod pagerank;
mod ranker;
mod similarity;

pub use graph::RelevanceGraph;
pub use pagerank::weighted_pagerank;
pub use ranker::{blend, SentenceRanker};
pub use similarity::{build_similarity, cosine_similarity, SimilarityMatrix};
