use fancy_regex::Regex;

use crate::error::{LemmaError, Result};
use crate::token::Word;

/// Splits raw text into sentences of Penn-Treebank-style words.
pub struct Segmenter {
    word_regex: Regex,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        let word_regex = Regex::new(
            r"(?xi)
            \p{L}+(?=n['’]t\b) |
            n['’]t\b |
            ['’](?:s|re|ve|ll|d|m)\b |
            \d+(?:[.,]\d+)* |
            \p{L}+(?:-\p{L}+)* |
            \.\.\. |
            [^\s\p{L}\d]
        ",
        )
        .map_err(|e| LemmaError::Tagging(format!("bad tokenizer pattern: {e}")))?;
        Ok(Self { word_regex })
    }

    pub fn words(&self, text: &str) -> Result<Vec<Word>> {
        let mut words = Vec::new();
        for mat in self.word_regex.find_iter(text) {
            let m = mat.map_err(|e| LemmaError::Tagging(e.to_string()))?;
            words.push(Word::new(m.as_str(), m.start(), m.end()));
        }
        Ok(words)
    }

    pub fn sentences(&self, text: &str) -> Result<Vec<Vec<Word>>> {
        let mut sentences = Vec::new();
        let mut current = Vec::new();
        for word in self.words(text)? {
            let ends = is_sentence_end(&word.text);
            current.push(word);
            if ends {
                sentences.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            sentences.push(current);
        }
        Ok(sentences)
    }
}

fn is_sentence_end(token: &str) -> bool {
    matches!(token, "." | "!" | "?" | "...")
}
