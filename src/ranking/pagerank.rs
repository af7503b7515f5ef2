//! Weighted PageRank over the relevance graph.
//!
//! Power iteration with edge weights as transition probabilities: a
//! random walk at sentence `u` moves to neighbor `v` with probability
//! proportional to the similarity weight of edge (u, v). Isolated nodes
//! are dangling - their probability mass teleports uniformly, so they end
//! up with the baseline score every unconnected node shares.
//!
//! Update per node, where W(u) is the total incident weight of u:
//!
//! ```text
//! PR(v) = (1-α)/n + α * ( Σ PR(u) * w(u,v) / W(u)  +  dangling_mass / n )
//!                         u ∈ neighbors(v)
//! ```
//!
//! Iterates until the largest per-node change drops below epsilon. A
//! walk that has not converged after `max_iterations` signals
//! `RankingUnavailable` instead of returning a half-settled vector, and
//! the orchestrator falls back to original-order truncation. Scores sum
//! to 1.0 over all nodes.

use petgraph::visit::EdgeRef;

use crate::error::RankError;

use super::graph::RelevanceGraph;

/// Compute structural importance scores, one per sentence index.
///
/// Returns the steady-state probability of the weighted random walk.
/// A single-node graph short-circuits to `[1.0]` rather than exercising
/// the iteration on a trivial structure.
pub fn weighted_pagerank(
    graph: &RelevanceGraph,
    alpha: f64,
    epsilon: f64,
    max_iterations: usize,
) -> Result<Vec<f64>, RankError> {
    let inner = graph.inner();
    let n = inner.node_count();

    if n == 0 {
        return Ok(Vec::new());
    }
    if n == 1 {
        // Full probability mass on the only node.
        return Ok(vec![1.0]);
    }

    // Total incident weight per node; zero marks a dangling node.
    let mut out_weight = vec![0.0f64; n];
    for edge in inner.edge_references() {
        let w = *edge.weight();
        out_weight[edge.source().index()] += w;
        out_weight[edge.target().index()] += w;
    }

    let uniform = 1.0 / n as f64;
    let mut ranks = vec![uniform; n];
    let mut new_ranks = vec![0.0f64; n];

    for iteration in 0..max_iterations {
        let dangling_mass: f64 = (0..n)
            .filter(|&i| out_weight[i] == 0.0)
            .map(|i| ranks[i])
            .sum();

        for v in inner.node_indices() {
            let mut incoming = 0.0;
            for edge in inner.edges(v) {
                // For an undirected edge, the endpoint that is not v
                let u = if edge.source() == v {
                    edge.target()
                } else {
                    edge.source()
                };
                incoming += ranks[u.index()] * edge.weight() / out_weight[u.index()];
            }

            new_ranks[v.index()] =
                (1.0 - alpha) * uniform + alpha * (incoming + dangling_mass * uniform);
        }

        if new_ranks.iter().any(|r| !r.is_finite()) {
            return Err(RankError::RankingUnavailable(
                "power iteration produced non-finite scores".into(),
            ));
        }

        let max_change = ranks
            .iter()
            .zip(&new_ranks)
            .map(|(old, new)| (new - old).abs())
            .fold(0.0f64, f64::max);

        std::mem::swap(&mut ranks, &mut new_ranks);

        if max_change < epsilon {
            tracing::debug!(
                iterations = iteration + 1,
                nodes = n,
                "pagerank converged"
            );
            return Ok(ranks);
        }
    }

    Err(RankError::RankingUnavailable(format!(
        "power iteration did not converge within {max_iterations} iterations"
    )))
}
