//! sentrank - query-focused sentence ranking
//!
//! Extracts, from a long document and a natural-language query, the small
//! subset of sentences most relevant to answering that query, for an
//! extractive answering step downstream.
//!
//! # Architecture
//!
//! ```text
//! Sentences + Query → Embedding → Similarity → Relevance → PageRank → Blend → Top-K
//!        ↓               ↓          Matrix       Graph        ↓         ↓       ↓
//!     external        provider     cosine      petgraph    power     0.3/0.7  rank
//!     tokenizer        trait       pairwise    UnGraph     iteration  linear   order
//! ```
//!
//! The ranking combines two signals: a structural one (weighted PageRank
//! over a graph whose edges link sentence pairs with cosine similarity
//! above 0.3) and a semantic one (direct query similarity), blended
//! 30/70 in favor of the query. Any recoverable failure along that path
//! degrades to the first `min(k, N)` sentences in document order - a
//! ranking outage must never abort the caller's answer pipeline.
//!
//! Embedding and answer-extraction models are external collaborators
//! injected behind the [`embed::EmbeddingProvider`] and
//! [`answer::AnswerExtractor`] traits.

pub mod answer;
pub mod config;
pub mod embed;
pub mod error;
pub mod pipeline;
pub mod ranking;
pub mod segment;
pub mod types;

// Re-export the main surface
pub use answer::{focused_context, AnswerExtractor, FALLBACK_ANSWER};
pub use config::Config;
pub use embed::{CachedEmbedder, EmbeddingProvider, HashedEmbedder};
pub use error::RankError;
pub use pipeline::QaPipeline;
pub use ranking::SentenceRanker;
pub use types::{Answer, QuestionResult, RankedSentence, RankingConfig};
