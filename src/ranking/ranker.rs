//! The ranking orchestrator - from raw sentences to a top-k selection.
//!
//! `SentenceRanker` wires the stages together: embed query and sentences,
//! build the similarity matrix and relevance graph, run weighted PageRank,
//! blend structural importance with direct query similarity, and sort.
//!
//! Failure policy: a ranking failure must never abort the caller's answer
//! pipeline. Every recoverable stage error (embedding provider down,
//! PageRank not converging) degrades to the naive context window - the
//! first `min(k, N)` sentences in original document order. Only contract
//! violations (mismatched embedding dimensionality) propagate, because
//! they indicate a caller bug. The orchestrator matches on the failure
//! kind explicitly rather than catching everything.

use crate::embed::EmbeddingProvider;
use crate::error::RankError;
use crate::types::{RankedSentence, RankingConfig};

use super::graph::RelevanceGraph;
use super::pagerank::weighted_pagerank;
use super::similarity::build_similarity;

/// Blend structural and query-similarity scores with the fixed linear
/// policy. Query relevance carries the majority weight because the
/// system's purpose is query-focused extraction; the structural term
/// still rewards sentences corroborated by related neighbors.
pub fn blend(structural: &[f64], query_similarities: &[f64], config: &RankingConfig) -> Vec<f64> {
    structural
        .iter()
        .zip(query_similarities)
        .map(|(s, q)| config.structural_weight * s + config.query_weight * q)
        .collect()
}

/// Query-focused sentence ranker.
///
/// The embedding provider is a constructor dependency so the serving
/// process injects its long-lived model backend once and tests substitute
/// deterministic stubs. All ranking state is call-scoped; a single ranker
/// serves concurrent calls without coordination.
pub struct SentenceRanker<P> {
    provider: P,
    config: RankingConfig,
}

impl<P: EmbeddingProvider> SentenceRanker<P> {
    pub fn new(provider: P, config: RankingConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Score every sentence against the query and return all of them in
    /// rank order (highest relevance first, ties in document order).
    ///
    /// This is the raw pipeline: errors propagate. Callers wanting the
    /// degradation policy use [`select_top`](Self::select_top).
    pub fn rank(&self, query: &str, sentences: &[String]) -> Result<Vec<RankedSentence>, RankError> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.provider.encode(query)?;
        let sentence_embeddings = self.provider.encode_batch(sentences)?;

        let (matrix, query_similarities) = build_similarity(&query_embedding, &sentence_embeddings)?;
        let graph = RelevanceGraph::build(&matrix, &query_similarities, self.config.similarity_threshold);

        let structural = weighted_pagerank(
            &graph,
            self.config.pagerank_alpha,
            self.config.pagerank_epsilon,
            self.config.pagerank_max_iterations,
        )?;

        let final_scores = blend(&structural, &query_similarities, &self.config);

        let mut ranked: Vec<RankedSentence> = final_scores
            .into_iter()
            .zip(sentences)
            .enumerate()
            .map(|(index, (score, text))| RankedSentence::new(score, index, text.clone()))
            .collect();
        ranked.sort();

        Ok(ranked)
    }

    /// Return the `min(k, N)` most relevant sentences in rank order.
    ///
    /// Degenerate inputs return empty without touching the embedding
    /// provider: zero sentences, `k == 0`, or a blank query. Recoverable
    /// stage failures fall back to the first `min(k, N)` sentences in
    /// original document order, unchanged. Contract violations propagate.
    pub fn select_top(
        &self,
        query: &str,
        sentences: &[String],
        k: usize,
    ) -> Result<Vec<String>, RankError> {
        if k == 0 || sentences.is_empty() || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        match self.rank(query, sentences) {
            Ok(ranked) => Ok(ranked.into_iter().take(k).map(|r| r.text).collect()),
            Err(err) if err.is_contract_violation() => Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "ranking failed, falling back to document order");
                Ok(sentences.iter().take(k).cloned().collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Deterministic provider: fixed vector per known text.
    struct StubEmbedder {
        dimension: usize,
        map: HashMap<String, Vec<f32>>,
    }

    impl StubEmbedder {
        fn new(dimension: usize) -> Self {
            Self {
                dimension,
                map: HashMap::new(),
            }
        }

        fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
            self.map.insert(text.to_string(), vector);
            self
        }
    }

    impl EmbeddingProvider for StubEmbedder {
        fn model_id(&self) -> &str {
            "stub-v1"
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn encode(&self, text: &str) -> Result<Vec<f32>, RankError> {
            self.map
                .get(text)
                .cloned()
                .ok_or_else(|| RankError::Embedding(format!("no stub vector for {text:?}")))
        }
    }

    /// Provider that always fails, to force the fallback path.
    struct FailingEmbedder;

    impl EmbeddingProvider for FailingEmbedder {
        fn model_id(&self) -> &str {
            "failing-v1"
        }

        fn dimension(&self) -> usize {
            4
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>, RankError> {
            Err(RankError::Embedding("model offline".into()))
        }
    }

    fn sentences(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn basis_ranker(query_vector: Vec<f32>, texts: &[&str]) -> SentenceRanker<StubEmbedder> {
        // Each sentence gets a distinct standard-basis vector, so all
        // pairwise similarities are 0 and ranking reduces to the query
        // term alone.
        let dim = query_vector.len();
        let mut stub = StubEmbedder::new(dim).with("query", query_vector);
        for (i, text) in texts.iter().enumerate() {
            let mut v = vec![0.0f32; dim];
            v[i] = 1.0;
            stub = stub.with(text, v);
        }
        SentenceRanker::new(stub, RankingConfig::default())
    }

    #[test]
    fn test_returns_min_k_n_sentences() {
        let texts = ["a", "b", "c"];
        let ranker = basis_ranker(vec![0.9, 0.5, 0.1], &texts);
        let input = sentences(&texts);

        assert_eq!(ranker.select_top("query", &input, 2).unwrap().len(), 2);
        assert_eq!(ranker.select_top("query", &input, 3).unwrap().len(), 3);
        // k >= N returns all N, not an error
        assert_eq!(ranker.select_top("query", &input, 10).unwrap().len(), 3);
    }

    #[test]
    fn test_k_zero_is_empty() {
        let texts = ["a", "b"];
        let ranker = basis_ranker(vec![0.9, 0.5], &texts);
        assert!(ranker.select_top("query", &sentences(&texts), 0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_is_empty_without_embedding() {
        // FailingEmbedder would error if the provider were consulted
        let ranker = SentenceRanker::new(FailingEmbedder, RankingConfig::default());
        assert!(ranker.select_top("query", &[], 5).unwrap().is_empty());
        assert!(ranker
            .select_top("   ", &sentences(&["a"]), 5)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_single_sentence_large_k() {
        let texts = ["Only sentence."];
        let ranker = basis_ranker(vec![0.7, 0.0], &texts);
        let result = ranker.select_top("query", &sentences(&texts), 5).unwrap();
        assert_eq!(result, vec!["Only sentence.".to_string()]);
    }

    #[test]
    fn test_rank_order_not_document_order() {
        let texts = ["low", "high", "mid"];
        let ranker = basis_ranker(vec![0.1, 0.9, 0.5], &texts);
        let result = ranker.select_top("query", &sentences(&texts), 3).unwrap();
        assert_eq!(result, sentences(&["high", "mid", "low"]));
    }

    #[test]
    fn test_dissimilar_sentences_rank_by_query_similarity() {
        // No pairwise similarity exceeds the threshold, so PageRank is
        // uniform and the blend reduces to the query term.
        let texts = ["third", "first", "second"];
        let ranker = basis_ranker(vec![0.2, 0.8, 0.5], &texts);
        let ranked = ranker.rank("query", &sentences(&texts)).unwrap();

        assert_eq!(ranked[0].text, "first");
        assert_eq!(ranked[1].text, "second");
        assert_eq!(ranked[2].text, "third");
        // Uniform structural share: score gaps mirror query-sim gaps
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_identical_embeddings_tie_break_lower_index_first() {
        let stub = StubEmbedder::new(2)
            .with("query", vec![1.0, 0.0])
            .with("twin one", vec![1.0, 0.0])
            .with("twin two", vec![1.0, 0.0]);
        let ranker = SentenceRanker::new(stub, RankingConfig::default());

        let input = sentences(&["twin one", "twin two"]);
        let ranked = ranker.rank("query", &input).unwrap();

        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
    }

    #[test]
    fn test_fallback_preserves_document_order() {
        let ranker = SentenceRanker::new(FailingEmbedder, RankingConfig::default());
        let input = sentences(&["first", "second", "third", "fourth"]);

        let result = ranker.select_top("query", &input, 3).unwrap();
        assert_eq!(result, sentences(&["first", "second", "third"]));

        // k larger than N: all sentences, still document order
        let result = ranker.select_top("query", &input, 10).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let stub = StubEmbedder::new(2)
            .with("query", vec![1.0, 0.0])
            .with("ok", vec![0.0, 1.0])
            .with("bad", vec![0.0, 1.0, 0.0]);
        let ranker = SentenceRanker::new(stub, RankingConfig::default());

        let err = ranker
            .select_top("query", &sentences(&["ok", "bad"]), 2)
            .unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_raising_query_similarity_never_lowers_rank() {
        let texts = ["a", "b", "c", "d"];
        let input = sentences(&texts);

        let position = |query_vector: Vec<f32>| -> usize {
            let ranker = basis_ranker(query_vector, &texts);
            let ranked = ranker.rank("query", &input).unwrap();
            ranked.iter().position(|r| r.text == "b").unwrap()
        };

        // Pairwise similarities stay fixed (orthogonal embeddings);
        // only sentence b's query component grows.
        let before = position(vec![0.9, 0.4, 0.3, 0.2]);
        let after = position(vec![0.9, 1.0, 0.3, 0.2]);
        assert!(after <= before);
        assert_eq!(after, 0);
    }

    #[test]
    fn test_feline_scenario() {
        // Hand-crafted semantic vectors: the two cat sentences are close
        // to each other and to the query; the market sentence is alone.
        let stub = StubEmbedder::new(4)
            .with("What are cats?", vec![0.8, 0.6, 0.0, 0.0])
            .with("The cat sat on the mat.", vec![1.0, 0.2, 0.0, 0.0])
            .with("Cats are small mammals.", vec![0.9, 0.5, 0.0, 0.1])
            .with("Stock markets fell today.", vec![0.0, 0.0, 1.0, 0.0])
            .with("Mammals are warm-blooded.", vec![0.2, 0.9, 0.0, 0.1]);
        let ranker = SentenceRanker::new(stub, RankingConfig::default());

        let input = sentences(&[
            "The cat sat on the mat.",
            "Cats are small mammals.",
            "Stock markets fell today.",
            "Mammals are warm-blooded.",
        ]);
        let top = ranker.select_top("What are cats?", &input, 2).unwrap();

        assert_eq!(top.len(), 2);
        assert!(top.contains(&"Cats are small mammals.".to_string()));
        assert!(!top.contains(&"Stock markets fell today.".to_string()));
        // Deterministic: repeated calls agree exactly
        assert_eq!(top, ranker.select_top("What are cats?", &input, 2).unwrap());
    }

    /// Provider deriving a vector from the text itself, for property
    /// tests over arbitrary inputs.
    struct IndexedEmbedder {
        query: Vec<f32>,
        vectors: Vec<Vec<f32>>,
    }

    impl EmbeddingProvider for IndexedEmbedder {
        fn model_id(&self) -> &str {
            "indexed-v1"
        }

        fn dimension(&self) -> usize {
            self.query.len()
        }

        fn encode(&self, text: &str) -> Result<Vec<f32>, RankError> {
            if text == "query" {
                return Ok(self.query.clone());
            }
            text.strip_prefix('s')
                .and_then(|i| i.parse::<usize>().ok())
                .and_then(|i| self.vectors.get(i).cloned())
                .ok_or_else(|| RankError::Embedding(format!("unknown text {text:?}")))
        }
    }

    proptest! {
        #[test]
        fn prop_select_top_cardinality(
            vectors in prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 3), 1..8),
            query in prop::collection::vec(-1.0f32..1.0, 3),
            k in 0usize..10,
        ) {
            let n = vectors.len();
            let input: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
            let ranker = SentenceRanker::new(
                IndexedEmbedder { query, vectors },
                RankingConfig::default(),
            );

            let result = ranker.select_top("query", &input, k).unwrap();

            // Exactly min(k, N) results, each drawn from the input, no
            // duplicates (input texts are unique by construction).
            prop_assert_eq!(result.len(), k.min(n));
            let mut seen = std::collections::HashSet::new();
            for text in &result {
                prop_assert!(input.contains(text));
                prop_assert!(seen.insert(text.clone()));
            }

            // k >= N yields a permutation of the input
            if k >= n {
                let mut sorted = result.clone();
                sorted.sort();
                let mut expected = input.clone();
                expected.sort();
                prop_assert_eq!(sorted, expected);
            }
        }
    }
}
