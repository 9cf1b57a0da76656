use crate::extractor::ExtractError;
use crate::tokenizer::TokenizeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to walk directory {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from {}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("Failed to tokenize {}: {source}", path.display())]
    Tokenize {
        path: PathBuf,
        #[source]
        source: TokenizeError,
    },

    #[error(transparent)]
    Setup(#[from] TokenizeError),
}

impl ProcessError {
    /// The file that caused the failure, if it is tied to one
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ProcessError::Read { path, .. }
            | ProcessError::Extract { path, .. }
            | ProcessError::Tokenize { path, .. } => Some(path),
            ProcessError::Walk { source, .. } => source.path(),
            ProcessError::Setup(_) => None,
        }
    }
}
