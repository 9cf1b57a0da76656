// Public API exports
pub mod chunker;
pub mod config;
pub mod extractor;
pub mod processor;
pub mod tokenizer;

// Re-export main types for convenience
pub use chunker::{chunk_text, TokenChunker, DEFAULT_MAX_TOKENS};
pub use config::{Config, FailurePolicy, DEFAULT_SUFFIX};
pub use extractor::{ExtractError, HtmlExtractor, TextExtractor};
pub use processor::{
    process_directory, process_directory_with, ChunkMap, DirectoryProcessor, ProcessError,
    ProcessReport, SkippedFile,
};
pub use tokenizer::{Encoding, TiktokenCounter, TokenCounter, TokenizeError};
