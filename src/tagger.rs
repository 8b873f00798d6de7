use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{LemmaError, Result};
use crate::segment::Segmenter;
use crate::token::{TaggedWord, Word};

/// Assigns part-of-speech tags to already segmented sentences.
///
/// Implementations are loaded once and shared between many streams, so
/// tagging takes `&self` and must be reentrant.
pub trait Tagger: Send + Sync {
    fn tag_sentences(&self, sentences: &[Vec<Word>]) -> Result<Vec<Vec<TaggedWord>>>;
}

/// Segmentation plus tagging: turns raw text into one flat tagged sequence.
pub struct TaggingAdapter {
    segmenter: Segmenter,
    tagger: Arc<dyn Tagger>,
}

impl TaggingAdapter {
    pub fn new(tagger: Arc<dyn Tagger>) -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::new()?,
            tagger,
        })
    }

    pub fn tagger(&self) -> &Arc<dyn Tagger> {
        &self.tagger
    }

    /// Tags the whole text up front. Sentence boundaries are dropped from the
    /// result; the tagger only uses them as context.
    pub fn tag_text(&self, text: &str) -> Result<Vec<TaggedWord>> {
        let sentences = self.segmenter.sentences(text)?;
        let tagged = self.tagger.tag_sentences(&sentences)?;
        let words: Vec<TaggedWord> = tagged.into_iter().flatten().collect();
        debug!(
            sentences = sentences.len(),
            words = words.len(),
            "tagged input text"
        );
        Ok(words)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AveragedPerceptron {
    pub feature_weights: HashMap<String, HashMap<String, f32>>,
    pub classes: Vec<String>,
}

impl AveragedPerceptron {
    pub fn new(feature_weights: HashMap<String, HashMap<String, f32>>, classes: Vec<String>) -> Self {
        Self {
            feature_weights,
            classes,
        }
    }

    /// Highest scoring class; the earliest class in `classes` wins ties.
    pub fn predict(&self, features: &[String]) -> (&str, f32) {
        let mut scores: HashMap<&str, f32> = HashMap::new();
        for feature in features {
            if let Some(weights) = self.feature_weights.get(feature) {
                for (label, weight) in weights {
                    *scores.entry(label.as_str()).or_insert(0.0) += weight;
                }
            }
        }

        let score_of = |class: &str| scores.get(class).copied().unwrap_or(0.0);
        let mut classes = self.classes.iter();
        let Some(first) = classes.next() else {
            return ("", 0.0);
        };
        let mut best = (first.as_str(), score_of(first.as_str()));
        for class in classes {
            let score = score_of(class.as_str());
            if score > best.1 {
                best = (class.as_str(), score);
            }
        }
        best
    }
}

/// Averaged-perceptron Penn Treebank tagger.
///
/// A model directory holds `weights.json` (feature -> tag -> weight),
/// `classes.txt` (one tag per line) and `tags.json` (words that always get the
/// same tag).
pub struct PerceptronTagger {
    model: AveragedPerceptron,
    tags: HashMap<String, String>,
}

pub const WEIGHTS_FILE: &str = "weights.json";
pub const CLASSES_FILE: &str = "classes.txt";
pub const TAGS_FILE: &str = "tags.json";

/// Shape of a Penn Treebank style tag such as `NN`, `PRP$`, `-LRB-` or `.`.
const TAG_SHAPE: &str = r"^[A-Z$#.,:()'`\-]+$";

impl PerceptronTagger {
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |path: &PathBuf| {
            fs::read_to_string(path).map_err(|e| LemmaError::model_load(path, e))
        };
        let [weights, classes, tags] = model_files(dir);
        let weights_json = read(&weights)?;
        let classes_txt = read(&classes)?;
        let tags_json = read(&tags)?;

        let tagger = Self::parse(dir, &weights_json, &classes_txt, &tags_json)?;
        debug!(
            path = %dir.display(),
            classes = tagger.model.classes.len(),
            features = tagger.model.feature_weights.len(),
            "loaded tagger model"
        );
        Ok(tagger)
    }

    pub fn from_strs(weights_json: &str, classes_txt: &str, tags_json: &str) -> Result<Self> {
        Self::parse(Path::new("<memory>"), weights_json, classes_txt, tags_json)
    }

    fn parse(origin: &Path, weights_json: &str, classes_txt: &str, tags_json: &str) -> Result<Self> {
        let err = |file: &str, reason: String| LemmaError::model_load(origin.join(file), reason);

        let feature_weights: HashMap<String, HashMap<String, f32>> =
            serde_json::from_str(weights_json).map_err(|e| err(WEIGHTS_FILE, e.to_string()))?;
        let tags: HashMap<String, String> =
            serde_json::from_str(tags_json).map_err(|e| err(TAGS_FILE, e.to_string()))?;
        let tag_shape = Regex::new(TAG_SHAPE).map_err(|e| err(CLASSES_FILE, e.to_string()))?;
        let mut classes = Vec::new();
        for (n, line) in classes_txt.lines().enumerate() {
            let class = line.trim();
            if class.is_empty() {
                continue;
            }
            if !tag_shape.is_match(class) {
                return Err(err(
                    CLASSES_FILE,
                    format!("line {}: '{}' is not a tag", n + 1, class),
                ));
            }
            classes.push(class.to_string());
        }
        if classes.is_empty() {
            return Err(err(CLASSES_FILE, "no tag classes".to_string()));
        }

        Ok(Self {
            model: AveragedPerceptron::new(feature_weights, classes),
            tags,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.model.classes
    }

    pub fn tag(&self, words: &[Word]) -> Vec<TaggedWord> {
        let mut prev = "-START-".to_string();
        let mut prev2 = "-START2-".to_string();
        let mut output = Vec::with_capacity(words.len());

        let mut context = Vec::with_capacity(words.len() + 4);
        context.push("-START-".to_string());
        context.push("-START2-".to_string());
        context.extend(words.iter().map(|w| normalize(&w.text)));
        context.push("-END-".to_string());
        context.push("-END2-".to_string());

        for (i, word) in words.iter().enumerate() {
            let tag = match self.tags.get(&word.text) {
                Some(tag) => tag.clone(),
                None => {
                    let features = get_features(i + 2, &word.text, &context, &prev, &prev2);
                    self.model.predict(&features).0.to_string()
                }
            };
            prev2 = std::mem::replace(&mut prev, tag.clone());
            output.push(TaggedWord::from_word(word, tag));
        }
        output
    }
}

impl Tagger for PerceptronTagger {
    fn tag_sentences(&self, sentences: &[Vec<Word>]) -> Result<Vec<Vec<TaggedWord>>> {
        Ok(sentences.iter().map(|s| self.tag(s)).collect())
    }
}

/// The three files making up a model directory.
pub fn model_files(dir: &Path) -> [PathBuf; 3] {
    [dir.join(WEIGHTS_FILE), dir.join(CLASSES_FILE), dir.join(TAGS_FILE)]
}

fn normalize(word: &str) -> String {
    if word.contains('-') && !word.starts_with('-') {
        "!HYPHEN".to_string()
    } else if word.len() == 4 && word.chars().all(|c| c.is_ascii_digit()) {
        "!YEAR".to_string()
    } else if word.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        "!DIGITS".to_string()
    } else {
        word.to_lowercase()
    }
}

fn suffix(word: &str, n: usize) -> String {
    let count = word.chars().count();
    word.chars().skip(count.saturating_sub(n)).collect()
}

fn get_features(i: usize, word: &str, context: &[String], prev: &str, prev2: &str) -> Vec<String> {
    let pref1: String = word.chars().take(1).collect();
    vec![
        "bias".to_string(),
        format!("i suffix {}", suffix(word, 3)),
        format!("i pref1 {}", pref1),
        format!("i-1 tag {}", prev),
        format!("i-2 tag {}", prev2),
        format!("i tag+i-2 tag {} {}", prev, prev2),
        format!("i word {}", context[i]),
        format!("i-1 tag+i word {} {}", prev, context[i]),
        format!("i-1 word {}", context[i - 1]),
        format!("i-1 suffix {}", suffix(&context[i - 1], 3)),
        format!("i-2 word {}", context[i - 2]),
        format!("i+1 word {}", context[i + 1]),
        format!("i+1 suffix {}", suffix(&context[i + 1], 3)),
        format!("i+2 word {}", context[i + 2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHTS: &str = r#"{
        "i suffix ing": {"VBG": 2.0, "NN": 0.5},
        "i suffix ats": {"NNS": 1.5},
        "i-1 tag DT": {"NN": 1.0}
    }"#;
    const CLASSES: &str = "NN\nNNS\nVBG\nVBD\n";
    const TAGS: &str = r#"{"the": "DT", "The": "DT", ".": "."}"#;

    fn words(text: &str) -> Vec<Word> {
        Segmenter::new().unwrap().words(text).unwrap()
    }

    #[test]
    fn test_dictionary_and_model_tags() {
        let tagger = PerceptronTagger::from_strs(WEIGHTS, CLASSES, TAGS).unwrap();
        let tagged = tagger.tag(&words("The cats running ."));
        let tags: Vec<&str> = tagged.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["DT", "NNS", "VBG", "."]);
        assert_eq!(tagged[1].word, "cats");
        assert_eq!((tagged[1].start, tagged[1].end), (4, 8));
    }

    #[test]
    fn test_previous_tag_feature() {
        let tagger = PerceptronTagger::from_strs(WEIGHTS, CLASSES, TAGS).unwrap();
        let tagged = tagger.tag(&words("the dog"));
        assert_eq!(tagged[1].tag, "NN");
    }

    #[test]
    fn test_ties_pick_first_class() {
        let tagger = PerceptronTagger::from_strs("{}", CLASSES, "{}").unwrap();
        let tagged = tagger.tag(&words("zzz"));
        assert_eq!(tagged[0].tag, "NN");
    }

    #[test]
    fn test_bad_model_is_load_error() {
        let err = PerceptronTagger::from_strs("not json", CLASSES, TAGS).err().unwrap();
        assert!(matches!(err, LemmaError::ModelLoad { .. }));
        let err = PerceptronTagger::from_strs(WEIGHTS, "\n\n", TAGS).err().unwrap();
        assert!(err.to_string().contains("classes.txt"));
    }

    #[test]
    fn test_malformed_class_line_is_load_error() {
        let classes = "NN\n{\"oops\": 1}\nthis is not a tag\n";
        let err = PerceptronTagger::from_strs("{}", classes, "{}").err().unwrap();
        match err {
            LemmaError::ModelLoad { path, reason } => {
                assert!(path.ends_with(CLASSES_FILE));
                assert!(reason.contains("line 2"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_penn_tag_shapes_accepted() {
        let classes = "NN\nPRP$\n-LRB-\n-RRB-\n.\n,\n:\n``\n''\n$\n#\n";
        let tagger = PerceptronTagger::from_strs("{}", classes, "{}").unwrap();
        assert_eq!(tagger.classes().len(), 11);
    }

    #[test]
    fn test_overflowing_scores_fall_back_to_first_class() {
        let weights: HashMap<String, HashMap<String, f32>> = serde_json::from_str(
            r#"{
                "a": {"NN": -3e38, "VB": -3e38},
                "b": {"NN": -3e38, "VB": -3e38}
            }"#,
        )
        .unwrap();
        let model = AveragedPerceptron::new(weights, vec!["NN".to_string(), "VB".to_string()]);
        let (class, score) = model.predict(&["a".to_string(), "b".to_string()]);
        assert_eq!(class, "NN");
        assert_eq!(score, f32::NEG_INFINITY);
    }

    #[test]
    fn test_missing_model_dir() {
        let err = PerceptronTagger::load("/nonexistent/model/dir").err().unwrap();
        match err {
            LemmaError::ModelLoad { path, .. } => assert!(path.ends_with(WEIGHTS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        for (file, body) in model_files(dir.path()).iter().zip([WEIGHTS, CLASSES, TAGS]) {
            fs::write(file, body).unwrap();
        }
        let tagger = PerceptronTagger::load(dir.path()).unwrap();
        assert_eq!(tagger.classes(), &["NN", "NNS", "VBG", "VBD"]);
    }

    #[test]
    fn test_adapter_flattens_sentences() {
        let tagger = PerceptronTagger::from_strs(WEIGHTS, CLASSES, TAGS).unwrap();
        let adapter = TaggingAdapter::new(Arc::new(tagger)).unwrap();
        let tagged = adapter.tag_text("The cats. The dog.").unwrap();
        let surface: Vec<&str> = tagged.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(surface, vec!["The", "cats", ".", "The", "dog", "."]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("well-known"), "!HYPHEN");
        assert_eq!(normalize("1999"), "!YEAR");
        assert_eq!(normalize("42"), "!DIGITS");
        assert_eq!(normalize("Cats"), "cats");
        assert_eq!(suffix("running", 3), "ing");
        assert_eq!(suffix("a", 3), "a");
    }
}
