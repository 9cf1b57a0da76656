mod error;
mod tiktoken;


pub use error::TokenizeError;
pub use tiktoken::{Encoding, TiktokenCounter};

/// Measures how many tokens a tokenizer assigns to a string.
///
/// The chunker only ever needs the length of an encoding, so this is the
/// whole surface a tokenizer has to provide.
pub trait TokenCounter: Send + Sync {
    /// Count the tokens in `text`
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizeError>;

    /// Name of the vocabulary, used in logs
    fn name(&self) -> &str;
}
