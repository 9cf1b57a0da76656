use crate::chunker::DEFAULT_MAX_TOKENS;
use crate::tokenizer::Encoding;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-name suffix selected by default (matched case-sensitively)
pub const DEFAULT_SUFFIX: &str = ".html";

/// What to do when a single file fails to read, extract or tokenize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the whole run on the first failing file
    #[default]
    Abort,
    /// Log the failure, record it in the report, and keep going
    Skip,
}

/// Settings for one directory run. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default)]
    pub encoding: Encoding,

    #[serde(default = "default_suffix")]
    pub suffix: String,

    #[serde(default)]
    pub follow_links: bool,

    #[serde(default)]
    pub on_error: FailurePolicy,
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            encoding: Encoding::default(),
            suffix: default_suffix(),
            follow_links: false,
            on_error: FailurePolicy::default(),
        }
    }
}

impl Config {
    /// Load a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            bail!("max_tokens must be greater than zero");
        }
        if self.suffix.is_empty() {
            bail!("suffix must not be empty");
        }
        Ok(())
    }
}
