//! Error taxonomy for the ranking pipeline.
//!
//! Failures fall into two classes with different propagation rules:
//!
//! - **Recoverable**: the embedding provider raised, or the centrality
//!   algorithm failed to converge. The orchestrator converts these into the
//!   deterministic fallback (first `min(k, N)` sentences in document order)
//!   and never surfaces them to the caller.
//! - **Contract violations**: malformed input shapes such as mismatched
//!   embedding dimensionality. These indicate a caller bug and propagate.
//!
//! The split is decided by [`RankError::is_contract_violation`], which the
//! orchestrator matches on explicitly instead of catching everything.

use thiserror::Error;

/// Errors produced by the ranking and answering pipeline.
#[derive(Debug, Error)]
pub enum RankError {
    /// The embedding provider was unavailable or raised.
    #[error("embedding provider failed: {0}")]
    Embedding(String),

    /// The centrality algorithm failed to converge or produced
    /// non-finite values.
    #[error("ranking unavailable: {0}")]
    RankingUnavailable(String),

    /// Embedding vectors within one ranking call had differing lengths.
    /// This is a caller bug, not a runtime condition.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The downstream answer-extraction model failed. Converted to a
    /// placeholder answer by the pipeline, never a hard failure.
    #[error("answer extraction failed: {0}")]
    AnswerExtraction(String),
}

impl RankError {
    /// Whether this error indicates a caller bug that must propagate.
    ///
    /// Everything else is handled internally via the fallback path.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, RankError::DimensionMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_is_contract_violation() {
        let err = RankError::DimensionMismatch {
            expected: 384,
            actual: 512,
        };
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_runtime_failures_are_recoverable() {
        assert!(!RankError::Embedding("model offline".into()).is_contract_violation());
        assert!(!RankError::RankingUnavailable("no convergence".into()).is_contract_violation());
        assert!(!RankError::AnswerExtraction("timeout".into()).is_contract_violation());
    }
}
