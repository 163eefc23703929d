//! Runtime configuration.
//!
//! Loaded from an optional JSON file. Every field has a default so a partial
//! file, or none at all, is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::{Path, PathBuf};

use crate::dictionary::LoadOptions;
use crate::letters::QuRule;
use crate::{DEFAULT_DISPLAY_LIMIT, MAX_WORD_LEN, MIN_WORD_LEN};

/// Complete ranker configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Word list to load, `.json`, `.bin` or plain text
    pub dictionary: PathBuf,
    /// Maximum number of ranked words shown, 0 for all of them
    pub display_limit: usize,
    /// Encoding of the fused "qu" tile
    pub qu_rule: QuRule,
    /// Words must be strictly longer than this
    pub min_word_len: usize,
    /// Words must be at most this long
    pub max_word_len: usize,
    /// Results printed per row
    pub columns: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from("ba2_words.json"),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            qu_rule: QuRule::default(),
            min_word_len: MIN_WORD_LEN,
            max_word_len: MAX_WORD_LEN,
            columns: 5,
        }
    }
}

impl Config {
    /// Reads a config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("could not parse config {}", path.display()))?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// The dictionary loader settings described by this config
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            min_len: self.min_word_len,
            max_len: self.max_word_len,
            rule: self.qu_rule,
        }
    }
}
