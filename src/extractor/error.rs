use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Content is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Failed to parse markup: {0}")]
    Parse(String),
}
