mod error;

#[cfg(test)]
mod tests;

pub use error::ProcessError;

use crate::chunker::TokenChunker;
use crate::config::{Config, FailurePolicy, DEFAULT_SUFFIX};
use crate::extractor::{HtmlExtractor, TextExtractor};
use crate::tokenizer::{Encoding, TiktokenCounter, TokenCounter};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File path to its ordered chunks
pub type ChunkMap = BTreeMap<PathBuf, Vec<String>>;

/// A file left out of the map under [`FailurePolicy::Skip`]
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one directory run
#[derive(Debug, Default)]
pub struct ProcessReport {
    pub chunks: ChunkMap,
    pub skipped: Vec<SkippedFile>,
}

impl ProcessReport {
    pub fn file_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.values().map(Vec::len).sum()
    }

    /// Chunks keyed by display path, ready for JSON output. Paths that are
    /// not valid UTF-8 are converted lossily and logged.
    pub fn chunks_by_display_path(&self) -> BTreeMap<String, &[String]> {
        self.chunks
            .iter()
            .map(|(path, chunks)| {
                if path.to_str().is_none() {
                    warn!(path = %path.display(), "Path is not valid UTF-8, using lossy key");
                }
                (path.to_string_lossy().into_owned(), chunks.as_slice())
            })
            .collect()
    }
}

/// Walks a tree, extracting and chunking every matching file
pub struct DirectoryProcessor {
    extractor: Box<dyn TextExtractor>,
    chunker: TokenChunker,
    suffix: String,
    follow_links: bool,
    on_error: FailurePolicy,
}

impl DirectoryProcessor {
    /// Processor with the HTML extractor and the given chunker, otherwise
    /// default settings
    pub fn new(chunker: TokenChunker) -> Self {
        Self {
            extractor: Box::new(HtmlExtractor),
            chunker,
            suffix: DEFAULT_SUFFIX.to_string(),
            follow_links: false,
            on_error: FailurePolicy::default(),
        }
    }

    /// Build a processor from a config, loading its tiktoken encoding
    pub fn from_config(config: &Config) -> Result<Self, ProcessError> {
        let counter = TiktokenCounter::new(config.encoding)?;
        Ok(Self::new(TokenChunker::new(counter, config.max_tokens))
            .suffix(config.suffix.clone())
            .follow_links(config.follow_links)
            .on_error(config.on_error))
    }

    /// Swap in a different extractor
    pub fn extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Set the case-sensitive file-name suffix to select
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn on_error(mut self, policy: FailurePolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Whether `path` names a file this processor selects
    pub fn selects(&self, path: &Path) -> bool {
        // Raw bytes, so names that are not valid UTF-8 still match
        path.file_name()
            .is_some_and(|name| name.as_encoded_bytes().ends_with(self.suffix.as_bytes()))
    }

    /// Extract and chunk one file
    pub fn process_file(&self, path: &Path) -> Result<Vec<String>, ProcessError> {
        let bytes = fs::read(path).map_err(|source| ProcessError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let text = self
            .extractor
            .extract_bytes(&bytes)
            .map_err(|source| ProcessError::Extract {
                path: path.to_path_buf(),
                source,
            })?;

        self.chunker
            .chunk(&text)
            .map_err(|source| ProcessError::Tokenize {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Walk `root` recursively and chunk every selected file
    pub fn process(&self, root: &Path) -> Result<ProcessReport, ProcessError> {
        info!(
            root = %root.display(),
            max_tokens = self.chunker.max_tokens(),
            encoding = self.chunker.counter().name(),
            "Scanning directory"
        );

        let mut report = ProcessReport::default();

        for entry in WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ProcessError::Walk {
                root: root.to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_file() || !self.selects(entry.path()) {
                continue;
            }

            let path = entry.into_path();
            match self.process_file(&path) {
                Ok(chunks) => {
                    debug!(path = %path.display(), chunks = chunks.len(), "Chunked file");
                    report.chunks.insert(path, chunks);
                }
                Err(err) if self.on_error == FailurePolicy::Skip => {
                    warn!(path = %path.display(), error = %err, "Skipping file");
                    report.skipped.push(SkippedFile {
                        path,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            files = report.file_count(),
            chunks = report.chunk_count(),
            skipped = report.skipped.len(),
            "Finished processing"
        );

        Ok(report)
    }
}

/// Chunk every `.html` file under `root` with the default encoding,
/// aborting on the first failing file
pub fn process_directory(root: &Path, max_tokens: usize) -> Result<ChunkMap, ProcessError> {
    let counter = TiktokenCounter::new(Encoding::default())?;
    let processor = DirectoryProcessor::new(TokenChunker::new(counter, max_tokens));
    Ok(processor.process(root)?.chunks)
}

/// Same as [`process_directory`] but with any token counter
pub fn process_directory_with(
    root: &Path,
    max_tokens: usize,
    counter: impl TokenCounter + 'static,
) -> Result<ChunkMap, ProcessError> {
    let processor = DirectoryProcessor::new(TokenChunker::new(counter, max_tokens));
    Ok(processor.process(root)?.chunks)
}
