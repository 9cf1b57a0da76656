use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenizeError {
    #[error("Tokenizer encoding {encoding} is unavailable: {reason}")]
    Unavailable { encoding: String, reason: String },

    #[error("Tokenizer rejected input: {0}")]
    Rejected(String),
}
