use regex::Regex;
use std::collections::HashSet;

use crate::error::{LemmaError, Result};

/// Decides from its tag alone whether a word is left out of the stream.
pub trait TagFilter: Send + Sync {
    fn is_unwanted(&self, tag: &str) -> bool;
}

impl<F> TagFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_unwanted(&self, tag: &str) -> bool {
        self(tag)
    }
}

/// Penn Treebank tags of punctuation and function words: conjunctions,
/// determiners, pronouns, modals, possessive markers, interjections and
/// the wh- words.
pub const PENN_STOP_TAGS: &[&str] = &[
    "CC", "DT", "LRB", "RRB", "MD", "POS", "PRP", "UH", "WDT", "WP", "WP$", "WRB", "$", "#",
    ".", ",", ":",
];

/// The default policy. Tags are compared exactly, so anything outside
/// [`PENN_STOP_TAGS`] (`PRP$`, `-LRB-`, custom tags) is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct PennStopTags;

impl TagFilter for PennStopTags {
    fn is_unwanted(&self, tag: &str) -> bool {
        PENN_STOP_TAGS.contains(&tag)
    }
}

/// Filters an explicit set of tags.
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    tags: HashSet<String>,
}

impl TagSet {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl TagFilter for TagSet {
    fn is_unwanted(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Filters tags matching a regular expression over the whole tag.
#[derive(Debug, Clone)]
pub struct TagPattern {
    regex: Regex,
}

impl TagPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| LemmaError::Config(format!("invalid tag pattern '{pattern}': {e}")))?;
        Ok(Self { regex })
    }
}

impl TagFilter for TagPattern {
    fn is_unwanted(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let filter = PennStopTags;
        for tag in PENN_STOP_TAGS {
            assert!(filter.is_unwanted(tag), "{tag} should be filtered");
        }
        for tag in ["NN", "VBD", "JJ", "RB", "IN", "PRP$", "-LRB-", "CD", "", "dt", "DTX"] {
            assert!(!filter.is_unwanted(tag), "{tag} should be kept");
        }
    }

    #[test]
    fn test_tag_set() {
        let filter = TagSet::new(["DT", "."]);
        assert_eq!(filter.len(), 2);
        assert!(filter.is_unwanted("DT"));
        assert!(filter.is_unwanted("."));
        assert!(!filter.is_unwanted("CC"));
    }

    #[test]
    fn test_tag_pattern_is_anchored() {
        let filter = TagPattern::new(r"CC|DT|[LR]RB|WP\$").unwrap();
        assert!(filter.is_unwanted("DT"));
        assert!(filter.is_unwanted("LRB"));
        assert!(filter.is_unwanted("WP$"));
        assert!(!filter.is_unwanted("-LRB-"));
        assert!(!filter.is_unwanted("WP"));
        assert!(!filter.is_unwanted("CCX"));
    }

    #[test]
    fn test_bad_pattern() {
        assert!(matches!(TagPattern::new("(("), Err(LemmaError::Config(_))));
    }

    #[test]
    fn test_closure_filter() {
        let verbs_only = |tag: &str| !tag.starts_with("VB");
        assert!(verbs_only.is_unwanted("NN"));
        assert!(!verbs_only.is_unwanted("VBD"));
    }
}
