use super::{TokenCounter, TokenizeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::CoreBPE;

/// Byte-pair encodings shipped with tiktoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// GPT-3.5 / GPT-4 vocabulary
    #[default]
    Cl100kBase,
    /// GPT-4o vocabulary
    O200kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

impl Encoding {
    pub const ALL: [Encoding; 5] = [
        Encoding::Cl100kBase,
        Encoding::O200kBase,
        Encoding::P50kBase,
        Encoding::P50kEdit,
        Encoding::R50kBase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::O200kBase => "o200k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
        }
    }

    fn load(&self) -> anyhow::Result<CoreBPE> {
        match self {
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::P50kEdit => tiktoken_rs::p50k_edit(),
            Encoding::R50kBase => tiktoken_rs::r50k_base(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = TokenizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| TokenizeError::Unavailable {
                encoding: s.to_string(),
                reason: format!(
                    "expected one of {}",
                    Encoding::ALL.map(|e| e.as_str()).join(", ")
                ),
            })
    }
}

/// Token counter backed by a tiktoken byte-pair encoding
pub struct TiktokenCounter {
    bpe: CoreBPE,
    encoding: Encoding,
}

impl TiktokenCounter {
    /// Load the ranks for `encoding`. This is the expensive part; build one
    /// counter and reuse it for every file.
    pub fn new(encoding: Encoding) -> Result<Self, TokenizeError> {
        let bpe = encoding.load().map_err(|e| TokenizeError::Unavailable {
            encoding: encoding.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { bpe, encoding })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizeError> {
        // Special-token markup in scraped text is counted as ordinary text
        Ok(self.bpe.encode_ordinary(text).len())
    }

    fn name(&self) -> &str {
        self.encoding.as_str()
    }
}
