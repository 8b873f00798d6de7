use crate::data::{self, IrregularForms};
use crate::error::Result;

/// Maps a tagged surface form to its dictionary base form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str, tag: &str) -> Result<String>;
}

impl<F> Lemmatizer for F
where
    F: Fn(&str, &str) -> Result<String> + Send + Sync,
{
    fn lemmatize(&self, word: &str, tag: &str) -> Result<String> {
        self(word, tag)
    }
}

/// Rule-based English morphology driven by Penn Treebank tags.
///
/// Irregular forms come from an embedded table; regular inflections are
/// undone by suffix rules. Proper nouns keep their case, everything else is
/// lowercased unless disabled with [`EnglishMorphology::with_lowercase`].
pub struct EnglishMorphology {
    irregular: IrregularForms,
    lowercase: bool,
}

impl Default for EnglishMorphology {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishMorphology {
    pub fn new() -> Self {
        Self {
            irregular: data::load_irregular_forms(),
            lowercase: true,
        }
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn lemma(&self, word: &str, tag: &str) -> String {
        let proper = tag.starts_with("NNP");
        let base = if self.lowercase && !proper {
            word.to_lowercase()
        } else {
            word.to_string()
        };
        let key = base.to_lowercase();

        let found = match tag {
            "VB" | "VBP" | "VBZ" | "VBD" | "VBN" | "VBG" => self
                .irregular
                .verbs
                .get(&key)
                .cloned()
                .or_else(|| verb_stem(&base, tag)),
            "NNS" | "NNPS" => self
                .irregular
                .nouns
                .get(&key)
                .cloned()
                .or_else(|| plural_stem(&base)),
            "JJR" | "JJS" | "RBR" | "RBS" => self
                .irregular
                .adjectives
                .get(&key)
                .cloned()
                .or_else(|| degree_stem(&base, tag)),
            _ => None,
        };

        found
            .or_else(|| self.irregular.other.get(&key).cloned())
            .unwrap_or(base)
    }
}

impl Lemmatizer for EnglishMorphology {
    fn lemmatize(&self, word: &str, tag: &str) -> Result<String> {
        Ok(self.lemma(word, tag))
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

fn long_enough(stem: &str) -> bool {
    stem.chars().count() >= 2
}

fn plural_stem(word: &str) -> Option<String> {
    if word.chars().count() > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return Some(format!("{stem}y"));
        }
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return word.strip_suffix("es").map(str::to_string);
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    word.strip_suffix('s')
        .filter(|stem| long_enough(stem))
        .map(str::to_string)
}

fn verb_stem(word: &str, tag: &str) -> Option<String> {
    match tag {
        "VBZ" => third_person_stem(word),
        "VBD" | "VBN" => past_stem(word),
        "VBG" => word
            .strip_suffix("ing")
            .filter(|stem| long_enough(stem))
            .map(restore),
        _ => None,
    }
}

fn third_person_stem(word: &str) -> Option<String> {
    if word.chars().count() > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return Some(format!("{stem}y"));
        }
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes", "oes"] {
        if word.ends_with(suffix) {
            return word.strip_suffix("es").map(str::to_string);
        }
    }
    if word.ends_with("ss") {
        return None;
    }
    word.strip_suffix('s')
        .filter(|stem| long_enough(stem))
        .map(str::to_string)
}

fn past_stem(word: &str) -> Option<String> {
    if word.chars().count() > 4 {
        if let Some(stem) = word.strip_suffix("ied") {
            return Some(format!("{stem}y"));
        }
    }
    if word.ends_with("eed") {
        return word.strip_suffix('d').map(str::to_string);
    }
    word.strip_suffix("ed")
        .filter(|stem| long_enough(stem))
        .map(restore)
}

fn degree_stem(word: &str, tag: &str) -> Option<String> {
    let (plain, with_y) = match tag {
        "JJR" | "RBR" => ("er", "ier"),
        _ => ("est", "iest"),
    };
    if word.chars().count() > with_y.len() + 1 {
        if let Some(stem) = word.strip_suffix(with_y) {
            return Some(format!("{stem}y"));
        }
    }
    word.strip_suffix(plain)
        .filter(|stem| long_enough(stem))
        .map(restore)
}

/// Undoes the spelling changes made when a suffix was attached: a doubled
/// final consonant ("stopp" -> "stop") or a dropped silent e ("mak" -> "make").
fn restore(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 4
        && chars[n - 1] == chars[n - 2]
        && "bdgmnprt".contains(chars[n - 1])
        && is_vowel(chars[n - 3])
        && is_consonant(chars[n - 4])
    {
        return chars[..n - 1].iter().collect();
    }
    if needs_silent_e(&chars) {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

fn needs_silent_e(chars: &[char]) -> bool {
    let n = chars.len();
    if n < 2 {
        return false;
    }
    let (last, before) = (chars[n - 1], chars[n - 2]);
    match last {
        'v' | 'u' | 'c' => return true,
        'l' if is_consonant(before) && !matches!(before, 'l' | 'r' | 'w') => return true,
        'g' if matches!(before, 'r' | 'd') => return true,
        's' | 'z' if matches!(before, 'i' | 'y') => return true,
        's' if n >= 3 && is_vowel(before) && is_vowel(chars[n - 3]) => return true,
        't' if before == 'a' && n >= 5 && is_consonant(chars[n - 3]) => return true,
        _ => {}
    }

    // A single short vowel closed by one consonant: "hop", "smil", "us".
    let vowel_groups = chars
        .iter()
        .zip(std::iter::once(&' ').chain(chars.iter()))
        .filter(|(c, prev)| is_vowel(**c) && !is_vowel(**prev))
        .count();
    is_consonant(last)
        && !matches!(last, 'w' | 'x' | 'y')
        && is_vowel(before)
        && (n == 2 || is_consonant(chars[n - 3]))
        && vowel_groups == 1
}
