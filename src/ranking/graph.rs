//! The relevance graph over sentence indices.
//!
//! Nodes are the N sentence positions, each carrying its query-similarity
//! score as the node weight. An undirected edge connects (i, j) iff their
//! pairwise cosine similarity strictly exceeds the threshold, weighted by
//! that similarity. Sentences with no sufficiently similar partner remain
//! as isolated nodes; they still participate in ranking and receive the
//! uniform teleportation share from PageRank.
//!
//! The graph is call-scoped: rebuilt fresh for every ranking invocation,
//! never cached across calls.

use petgraph::graph::{NodeIndex, UnGraph};

use super::similarity::SimilarityMatrix;

/// Undirected weighted graph over sentence indices.
///
/// Node weight = query similarity, edge weight = pairwise similarity.
/// Node indices coincide with sentence positions because nodes are added
/// in document order and never removed.
#[derive(Debug)]
pub struct RelevanceGraph {
    graph: UnGraph<f64, f64>,
}

impl RelevanceGraph {
    /// Build the graph from a pairwise similarity matrix and the
    /// query-similarity vector.
    ///
    /// Edges require similarity strictly greater than `threshold`; NaN
    /// similarities never qualify, so no NaN edge weight can enter the
    /// graph.
    pub fn build(
        matrix: &SimilarityMatrix,
        query_similarities: &[f64],
        threshold: f64,
    ) -> Self {
        let n = matrix.len();
        let mut graph = UnGraph::with_capacity(n, 0);

        for &query_score in query_similarities.iter().take(n) {
            graph.add_node(query_score);
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let similarity = matrix.get(i, j);
                if similarity > threshold {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), similarity);
                }
            }
        }

        Self { graph }
    }

    /// Number of sentence nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of qualifying edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Query-similarity score attached to sentence `i`.
    pub fn query_score(&self, i: usize) -> f64 {
        self.graph[NodeIndex::new(i)]
    }

    /// The underlying petgraph structure, for the centrality algorithm.
    pub fn inner(&self) -> &UnGraph<f64, f64> {
        &self.graph
    }
}
