//! Naive sentence segmentation.
//!
//! The ranking core consumes pre-tokenized sentences; real deployments
//! bring a proper tokenizer. This splitter exists so the CLI can consume
//! plain-text files directly: it cuts on `.`, `!` and `?` followed by
//! whitespace, keeps the terminator with its sentence, and drops
//! whitespace-only fragments. Abbreviations and decimal points will
//! confuse it, which is acceptable for a demo path.

/// Split raw text into an ordered sequence of non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |next| next.is_whitespace()) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trailing = current.trim();
    if !trailing.is_empty() {
        sentences.push(trailing.to_string());
    }

    sentences
}
