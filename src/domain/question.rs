// ============================================================
// Layer 3 — Question Domain Type
// ============================================================
// A question as produced upstream by the QA pipeline: the raw
// text per language code plus mentions that were already
// resolved to entity URIs.
//
// Example (JSON):
//   {
//     "language_to_question": { "en": "Who painted the Mona Lisa?" },
//     "language_to_named_entities": {
//       "en": [ { "label": "Mona Lisa", "uris": ["http://ex/MonaLisa"] } ]
//     }
//   }

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The only language entry this crate consumes.
pub const ENGLISH: &str = "en";

/// A span of text already resolved to candidate identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface form as it appears in the question. May be empty.
    #[serde(default)]
    pub label: String,

    /// Candidate URIs, best first. Only the first one is used.
    #[serde(default)]
    pub uris: Vec<String>,
}

impl Entity {
    pub fn new(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            uris:  vec![uri.into()],
        }
    }

    /// The identifier that replaces the label, if any candidate exists.
    pub fn first_uri(&self) -> Option<&str> {
        self.uris.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub language_to_question: HashMap<String, String>,

    #[serde(default)]
    pub language_to_named_entities: HashMap<String, Vec<Entity>>,

    #[serde(default)]
    pub language_to_noun_phrases: HashMap<String, Vec<Entity>>,
}

impl Question {
    /// Build an English-only question with no mentions.
    pub fn english(text: impl Into<String>) -> Self {
        let mut q = Self::default();
        q.language_to_question.insert(ENGLISH.to_string(), text.into());
        q
    }

    pub fn with_named_entities(mut self, mentions: Vec<Entity>) -> Self {
        self.language_to_named_entities
            .insert(ENGLISH.to_string(), mentions);
        self
    }

    pub fn with_noun_phrases(mut self, mentions: Vec<Entity>) -> Self {
        self.language_to_noun_phrases
            .insert(ENGLISH.to_string(), mentions);
        self
    }

    pub fn text(&self, language: &str) -> Option<&str> {
        self.language_to_question.get(language).map(String::as_str)
    }

    /// Named-entity mentions for a language; empty when none were recorded.
    pub fn named_entities(&self, language: &str) -> &[Entity] {
        self.language_to_named_entities
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn noun_phrases(&self, language: &str) -> &[Entity] {
        self.language_to_noun_phrases
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Load a question from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read question from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid question JSON in '{}'", path.display()))
    }
}
