use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LemmaError, Result};

/// Settings for building an [`EnglishLemmaAnalyzer`](crate::EnglishLemmaAnalyzer).
///
/// ```json
/// { "model": "models/english", "unwanted_tags": ["DT", "."], "lowercase_lemmas": true }
/// ```
///
/// `unwanted_pattern` is a regular expression over the whole tag and cannot be
/// combined with `unwanted_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory holding the tagger model files.
    pub model: PathBuf,
    /// Tags to drop instead of the default Penn stop tags.
    #[serde(default)]
    pub unwanted_tags: Option<Vec<String>>,
    #[serde(default)]
    pub unwanted_pattern: Option<String>,
    #[serde(default = "default_lowercase")]
    pub lowercase_lemmas: bool,
}

fn default_lowercase() -> bool {
    true
}

impl AnalyzerConfig {
    pub fn new(model: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            unwanted_tags: None,
            unwanted_pattern: None,
            lowercase_lemmas: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LemmaError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| LemmaError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}
