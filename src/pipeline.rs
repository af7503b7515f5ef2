//! The composed question-answering pipeline.
//!
//! One document, many questions: each question is an independent unit of
//! work - rank the document's sentences against it, build a focused
//! context from the top-ranked few, and hand that context to the answer
//! extractor. Questions run on a rayon worker pool since ranking calls
//! share no mutable state; sentence embeddings depend only on sentence
//! text, so wrapping the provider in a `CachedEmbedder` means the
//! document is encoded once and reused for every question.

use rayon::prelude::*;

use crate::answer::{extract_or_fallback, focused_context, AnswerExtractor, FALLBACK_ANSWER};
use crate::embed::EmbeddingProvider;
use crate::error::RankError;
use crate::ranking::SentenceRanker;
use crate::types::{QuestionResult, RankingConfig};

/// Ranker plus answer extractor, composed per the degradation contract:
/// ranking failures fall back to the naive context window, extraction
/// failures fall back to the placeholder answer, and neither aborts the
/// caller.
pub struct QaPipeline<P, E> {
    ranker: SentenceRanker<P>,
    extractor: E,
}

impl<P: EmbeddingProvider, E: AnswerExtractor> QaPipeline<P, E> {
    pub fn new(provider: P, extractor: E, config: RankingConfig) -> Self {
        Self {
            ranker: SentenceRanker::new(provider, config),
            extractor,
        }
    }

    pub fn ranker(&self) -> &SentenceRanker<P> {
        &self.ranker
    }

    /// Answer every question against one document's sentences.
    ///
    /// Questions are processed in parallel; results come back in question
    /// order. A document with no sentences short-circuits to placeholder
    /// answers without consulting the embedding provider or the
    /// extractor. The only errors that surface are contract violations
    /// from the ranking core.
    pub fn answer_questions(
        &self,
        sentences: &[String],
        questions: &[String],
    ) -> Result<Vec<QuestionResult>, RankError> {
        if sentences.is_empty() {
            return Ok(questions
                .iter()
                .map(|question| QuestionResult {
                    question: question.clone(),
                    answer: FALLBACK_ANSWER.to_string(),
                    confidence: 0.0,
                    relevant_context: Vec::new(),
                })
                .collect());
        }

        questions
            .par_iter()
            .map(|question| self.answer_one(question, sentences))
            .collect()
    }

    fn answer_one(&self, question: &str, sentences: &[String]) -> Result<QuestionResult, RankError> {
        let config = self.ranker.config();
        let ranked = self.ranker.select_top(question, sentences, config.top_k)?;
        let context = focused_context(&ranked, config.context_sentences);
        let answer = extract_or_fallback(&self.extractor, question, &context);

        let mut relevant_context = ranked;
        relevant_context.truncate(config.context_sentences);

        Ok(QuestionResult {
            question: question.to_string(),
            answer: answer.answer,
            confidence: answer.confidence,
            relevant_context,
        })
    }
}
