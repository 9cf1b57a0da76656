mod splitter;


pub use splitter::{chunk_text, TokenChunker};

/// Maximum tokens per chunk when nothing else is configured
pub const DEFAULT_MAX_TOKENS: usize = 300;
