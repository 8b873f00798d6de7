use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// Irregular inflections that the suffix rules cannot undo, grouped by the
/// word class whose tags they apply to.
#[derive(Debug, Default, Deserialize)]
pub struct IrregularForms {
    #[serde(default)]
    pub verbs: HashMap<String, String>,
    #[serde(default)]
    pub nouns: HashMap<String, String>,
    #[serde(default)]
    pub adjectives: HashMap<String, String>,
    #[serde(default)]
    pub other: HashMap<String, String>,
}

pub fn load_irregular_forms() -> IrregularForms {
    let data = include_str!("../data/irregular.json");
    serde_json::from_str(data).unwrap_or_else(|e| {
        warn!(error = %e, "embedded irregular forms table is unreadable");
        IrregularForms::default()
    })
}
