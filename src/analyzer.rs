use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::{LemmaError, Result};
use crate::filter::{PennStopTags, TagFilter, TagPattern, TagSet};
use crate::lemma::{EnglishMorphology, Lemmatizer};
use crate::stream::LemmaTokenStream;
use crate::tagger::{PerceptronTagger, Tagger, TaggingAdapter};
use crate::token::OutputToken;

/// Builds one [`LemmaTokenStream`] per input text.
///
/// The tagger is the expensive part: load it once and share the analyzer (or
/// the `Arc<dyn Tagger>`) between all the fields and documents being indexed.
pub struct EnglishLemmaAnalyzer {
    adapter: TaggingAdapter,
    lemmatizer: Arc<dyn Lemmatizer>,
    filter: Arc<dyn TagFilter>,
}

impl EnglishLemmaAnalyzer {
    pub fn new(tagger: Arc<dyn Tagger>) -> Result<Self> {
        Ok(Self {
            adapter: TaggingAdapter::new(tagger)?,
            lemmatizer: Arc::new(EnglishMorphology::new()),
            filter: Arc::new(PennStopTags),
        })
    }

    /// Loads a perceptron tagger model directory.
    pub fn from_model(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Arc::new(PerceptronTagger::load(path)?))
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        if config.unwanted_tags.is_some() && config.unwanted_pattern.is_some() {
            return Err(LemmaError::Config(
                "unwanted_tags and unwanted_pattern are mutually exclusive".to_string(),
            ));
        }
        let pattern = config.unwanted_pattern.as_deref().map(TagPattern::new).transpose()?;

        let mut analyzer = Self::from_model(&config.model)?
            .with_lemmatizer(Arc::new(
                EnglishMorphology::new().with_lowercase(config.lowercase_lemmas),
            ));
        if let Some(tags) = &config.unwanted_tags {
            analyzer = analyzer.with_filter(Arc::new(TagSet::new(tags.iter().cloned())));
        }
        if let Some(pattern) = pattern {
            analyzer = analyzer.with_filter(Arc::new(pattern));
        }
        debug!(model = %config.model.display(), "analyzer configured");
        Ok(analyzer)
    }

    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    pub fn with_filter(mut self, filter: Arc<dyn TagFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn tagger(&self) -> &Arc<dyn Tagger> {
        self.adapter.tagger()
    }

    pub fn token_stream(&self, text: &str) -> Result<LemmaTokenStream> {
        LemmaTokenStream::new(
            text,
            &self.adapter,
            Arc::clone(&self.lemmatizer),
            Arc::clone(&self.filter),
        )
    }

    /// Reads the whole input before tagging it.
    pub fn token_stream_from_reader<R: Read>(&self, mut reader: R) -> Result<LemmaTokenStream> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.token_stream(&text)
    }

    pub fn analyze(&self, text: &str) -> Result<Vec<OutputToken>> {
        self.token_stream(text)?.collect()
    }
}
