use serde::{Deserialize, Serialize};

/// A word as cut out of the input text, before tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Word {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// A surface form paired with the part-of-speech tag the tagger assigned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub word: String,
    pub tag: String,
    pub start: usize,
    pub end: usize,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
            start: 0,
            end: 0,
        }
    }

    pub fn from_word(word: &Word, tag: impl Into<String>) -> Self {
        Self {
            word: word.text.clone(),
            tag: tag.into(),
            start: word.start,
            end: word.end,
        }
    }

    pub fn with_offsets(mut self, start: usize, end: usize) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

/// One term handed to the indexing pipeline.
///
/// `position_increment` is 0 for a lemma (it shares the position of its
/// surface form), 1 for a form directly after the previous accepted word, and
/// larger when filtered words were skipped in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputToken {
    pub text: String,
    pub position_increment: u32,
    pub start: usize,
    pub end: usize,
}

impl OutputToken {
    pub fn new(text: impl Into<String>, position_increment: u32) -> Self {
        Self {
            text: text.into(),
            position_increment,
            start: 0,
            end: 0,
        }
    }

    pub fn is_lemma(&self) -> bool {
        self.position_increment == 0
    }
}
