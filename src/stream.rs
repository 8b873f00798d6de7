use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::{LemmaError, Result};
use crate::filter::TagFilter;
use crate::lemma::Lemmatizer;
use crate::tagger::TaggingAdapter;
use crate::token::{OutputToken, TaggedWord};

/// The pull interface an indexing pipeline drives a tokenizer through.
pub trait TokenStream {
    /// Moves to the next token. `Ok(false)` means the stream is exhausted.
    fn advance(&mut self) -> Result<bool>;

    fn term(&self) -> &str;

    fn position_increment(&self) -> u32;

    /// Byte offsets of the word the current token came from.
    fn offsets(&self) -> (usize, usize);

    /// Clears the current token. Does not rewind.
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingForm,
    /// Holds the index of the word whose surface form was just emitted.
    AwaitingLemma(usize),
}

/// Emits every accepted word twice: first its surface form, then its lemma at
/// the same position.
///
/// Words whose tag the filter rejects are dropped entirely, but they still
/// count towards the position increment of the next surface form, so phrase
/// adjacency across them is preserved.
pub struct LemmaTokenStream {
    words: Vec<TaggedWord>,
    index: usize,
    phase: Phase,
    lemmatizer: Arc<dyn Lemmatizer>,
    filter: Arc<dyn TagFilter>,
    token: Option<OutputToken>,
    failed: bool,
}

impl LemmaTokenStream {
    /// Tags `text` in full before returning; no token is produced until the
    /// whole input has been tagged.
    pub fn new(
        text: &str,
        adapter: &TaggingAdapter,
        lemmatizer: Arc<dyn Lemmatizer>,
        filter: Arc<dyn TagFilter>,
    ) -> Result<Self> {
        let words = adapter.tag_text(text)?;
        debug!(bytes = text.len(), words = words.len(), "built lemma token stream");
        Ok(Self::from_tagged(words, lemmatizer, filter))
    }

    pub fn from_tagged(
        words: Vec<TaggedWord>,
        lemmatizer: Arc<dyn Lemmatizer>,
        filter: Arc<dyn TagFilter>,
    ) -> Self {
        Self {
            words,
            index: 0,
            phase: Phase::AwaitingForm,
            lemmatizer,
            filter,
            token: None,
            failed: false,
        }
    }

    pub fn tagged_words(&self) -> &[TaggedWord] {
        &self.words
    }

    /// Produces the next token, or `None` once the tagged words run out.
    ///
    /// A lemmatizer failure is returned from the call that would have
    /// produced the lemma; the stream stays in front of that lemma.
    pub fn next_token(&mut self) -> Result<Option<OutputToken>> {
        match self.phase {
            Phase::AwaitingLemma(current) => self.emit_lemma(current).map(Some),
            Phase::AwaitingForm => Ok(self.emit_form()),
        }
    }

    fn emit_lemma(&mut self, current: usize) -> Result<OutputToken> {
        let word = &self.words[current];
        let lemma = self
            .lemmatizer
            .lemmatize(&word.word, &word.tag)
            .map_err(|e| match e {
                LemmaError::Lemmatization { .. } => e,
                other => LemmaError::lemmatization(&word.word, &word.tag, other),
            })?;
        let token = OutputToken {
            text: lemma,
            position_increment: 0,
            start: word.start,
            end: word.end,
        };
        trace!(term = %token.text, "lemma");
        self.phase = Phase::AwaitingForm;
        Ok(token)
    }

    fn emit_form(&mut self) -> Option<OutputToken> {
        let mut skipped: u32 = 0;
        while let Some(word) = self.words.get(self.index) {
            let i = self.index;
            self.index += 1;
            if self.filter.is_unwanted(&word.tag) {
                skipped += 1;
                continue;
            }
            let token = OutputToken {
                text: word.word.clone(),
                position_increment: skipped + 1,
                start: word.start,
                end: word.end,
            };
            trace!(term = %token.text, tag = %word.tag, increment = token.position_increment, "form");
            self.phase = Phase::AwaitingLemma(i);
            return Some(token);
        }
        None
    }
}

impl TokenStream for LemmaTokenStream {
    fn advance(&mut self) -> Result<bool> {
        self.token = None;
        self.token = self.next_token()?;
        Ok(self.token.is_some())
    }

    fn term(&self) -> &str {
        self.token.as_ref().map_or("", |t| t.text.as_str())
    }

    fn position_increment(&self) -> u32 {
        self.token.as_ref().map_or(0, |t| t.position_increment)
    }

    fn offsets(&self) -> (usize, usize) {
        self.token.as_ref().map_or((0, 0), |t| (t.start, t.end))
    }

    fn reset(&mut self) {
        self.token = None;
    }
}

/// Yields tokens until the end of input. After an error is yielded the
/// iterator is finished.
impl Iterator for LemmaTokenStream {
    type Item = Result<OutputToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
