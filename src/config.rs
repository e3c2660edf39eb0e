use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Page fetched when no URL is given
pub const DEFAULT_SOURCE_URL: &str = "https://developer.mozilla.org/ja/docs/Web/JavaScript/Guide";

/// Selector for the content region
pub const DEFAULT_CONTENT_SELECTOR: &str = "main";

/// Configuration for the link extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// URL of the page to fetch
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// CSS selector locating the content region; the first match is used
    #[serde(default = "default_content_selector")]
    pub content_selector: String,
}

impl ExtractorConfig {
    /// Create a new configuration with default values
    pub fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            content_selector: default_content_selector(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        contents.parse()
    }
}

impl FromStr for ExtractorConfig {
    type Err = ExtractError;

    /// Parse configuration from a JSON string
    fn from_str(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        Ok(config)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL)
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_content_selector() -> String {
    DEFAULT_CONTENT_SELECTOR.to_string()
}
