use super::DEFAULT_MAX_TOKENS;
use crate::tokenizer::{TokenCounter, TokenizeError};

/// Greedy word packer bound to one token counter
pub struct TokenChunker {
    counter: Box<dyn TokenCounter>,
    max_tokens: usize,
}

impl TokenChunker {
    pub fn new(counter: impl TokenCounter + 'static, max_tokens: usize) -> Self {
        Self {
            counter: Box::new(counter),
            max_tokens,
        }
    }

    /// Use the default budget of [`DEFAULT_MAX_TOKENS`]
    pub fn with_default_budget(counter: impl TokenCounter + 'static) -> Self {
        Self::new(counter, DEFAULT_MAX_TOKENS)
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn counter(&self) -> &dyn TokenCounter {
        &*self.counter
    }

    /// Split `text` into chunks of at most `max_tokens` tokens each
    pub fn chunk(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        chunk_text(text, self.max_tokens, &*self.counter)
    }
}

/// Pack whitespace-delimited words into chunks greedily:
/// - Words keep their original order and each lands in exactly one chunk
/// - A candidate is the current chunk plus `" " + word`, measured whole
/// - When the candidate is over budget, the current chunk is emitted and the
///   word starts the next one
/// - A single word over budget becomes its own oversized chunk
/// - Chunks are trimmed on emission; empty chunks are never emitted
pub fn chunk_text(
    text: &str,
    max_tokens: usize,
    counter: &dyn TokenCounter,
) -> Result<Vec<String>, TokenizeError> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = format!("{current} {word}");

        if counter.count_tokens(&candidate)? <= max_tokens {
            current = candidate;
            continue;
        }

        push_trimmed(&mut chunks, &current);
        current = word.to_string();
    }

    push_trimmed(&mut chunks, &current);

    Ok(chunks)
}

fn push_trimmed(chunks: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
