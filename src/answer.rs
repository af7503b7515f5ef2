//! Answer extraction boundary.
//!
//! The extractive answering model is an external collaborator: the core's
//! only contract with it is "supply ordered context text, receive an
//! answer with a confidence". A failing extractor yields a designated
//! placeholder answer with zero confidence - never a hard failure, so a
//! model outage degrades the response instead of aborting the pipeline.

use crate::error::RankError;
use crate::types::Answer;

/// Placeholder answer returned when the extraction model fails.
pub const FALLBACK_ANSWER: &str = "Unable to generate answer";

/// An extractive question-answering backend.
///
/// Implementations must tolerate "no answer found" by returning a
/// low-confidence response rather than erroring; `Err` is reserved for
/// operational failures (model unavailable, inference raised).
pub trait AnswerExtractor: Send + Sync {
    fn answer(&self, question: &str, context: &str) -> Result<Answer, RankError>;
}

/// Concatenate the top-ranked sentences into the focused context handed
/// to the extraction model: the first `n` of the ranked result, joined
/// with single spaces, in rank order.
pub fn focused_context(ranked_sentences: &[String], n: usize) -> String {
    ranked_sentences[..n.min(ranked_sentences.len())].join(" ")
}

/// Run the extractor, degrading to the placeholder answer on failure.
///
/// Confidence is rounded to 4 decimal places.
pub fn extract_or_fallback<E: AnswerExtractor>(
    extractor: &E,
    question: &str,
    context: &str,
) -> Answer {
    match extractor.answer(question, context) {
        Ok(answer) => Answer {
            answer: answer.answer,
            confidence: (answer.confidence * 10_000.0).round() / 10_000.0,
        },
        Err(err) => {
            tracing::warn!(error = %err, "answer extraction failed, using placeholder");
            Answer {
                answer: FALLBACK_ANSWER.to_string(),
                confidence: 0.0,
            }
        }
    }
}
