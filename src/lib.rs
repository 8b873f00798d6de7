pub mod token;
pub mod error;
pub mod data;
pub mod segment;
pub mod tagger;
pub mod lemma;
pub mod filter;
pub mod stream;
pub mod config;
pub mod analyzer;

pub use analyzer::EnglishLemmaAnalyzer;
pub use config::AnalyzerConfig;
pub use error::{LemmaError, Result};
pub use filter::{PennStopTags, TagFilter, TagPattern, TagSet};
pub use lemma::{EnglishMorphology, Lemmatizer};
pub use stream::{LemmaTokenStream, TokenStream};
pub use tagger::{PerceptronTagger, Tagger, TaggingAdapter};
pub use token::{OutputToken, TaggedWord, Word};
