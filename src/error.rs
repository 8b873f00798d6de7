use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LemmaError {
    #[error("failed to load tagger model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("tagging failed: {0}")]
    Tagging(String),

    #[error("cannot lemmatize '{word}' ({tag}): {reason}")]
    Lemmatization {
        word: String,
        tag: String,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl LemmaError {
    pub fn model_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        LemmaError::ModelLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn lemmatization(word: &str, tag: &str, reason: impl ToString) -> Self {
        LemmaError::Lemmatization {
            word: word.to_string(),
            tag: tag.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LemmaError>;
