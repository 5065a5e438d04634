// ============================================================
// Layer 2 — Parse Use Case
// ============================================================
// Runs one question end to end:
//
//   Step 1: Replace named-entity labels by URIs     (Layer 4)
//   Step 2: Replace noun-phrase labels by URIs      (Layer 4)
//   Step 3: Annotate the question text              (Layer 6)
//   Step 4: Take the first sentence's graph
//   Step 5: Convert it into a MutableTree           (Layer 5)
//
// By default Step 3 parses the ORIGINAL question text and the
// normalised sentence is only logged. Set parse_normalized to
// parse the rewritten text instead.

use std::{fs, path::Path};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::data::normalizer::{replace_labels_by_uris, MatchMode};
use crate::domain::{
    dependency::DependencyGraph,
    question::{Question, ENGLISH},
    traits::{QuestionTreeParser, TextAnnotator},
    tree::MutableTree,
};
use crate::error::{ParseTreeError, Result};
use crate::nlp::converter::{TreeConverter, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

// ─── Parse Configuration ─────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Parse the entity-substituted sentence instead of the original text
    pub parse_normalized: bool,
    pub match_mode:       MatchMode,
    /// Deepest tree accepted before the graph is treated as malformed
    pub max_depth:        usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            parse_normalized: false,
            match_mode:       MatchMode::Substring,
            max_depth:        DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config JSON in '{}'", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in '{}'", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.max_depth <= MAX_DEPTH_LIMIT,
            "max_depth {} exceeds the limit of {}",
            self.max_depth,
            MAX_DEPTH_LIMIT
        );
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved parse config to '{}'", path.display());
        Ok(())
    }
}

// ─── QuestionParser ───────────────────────────────────────────────────────────
/// Owns one annotator for its whole lifetime and reuses it for
/// every question. Pass `&annotator` to share one between parsers.
pub struct QuestionParser<A: TextAnnotator> {
    annotator: A,
    converter: TreeConverter,
    config:    ParseConfig,
}

impl<A: TextAnnotator> QuestionParser<A> {
    pub fn new(annotator: A, config: ParseConfig) -> Self {
        let converter = TreeConverter::new(config.max_depth);
        Self { annotator, converter, config }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn normalize(&self, question: &Question) -> Result<String> {
        normalize_question(question, self.config.match_mode)
    }

    /// Annotate `text` and return the graph of its first sentence.
    pub fn parse(&self, text: &str) -> Result<DependencyGraph> {
        let mut sentences = self.annotator.annotate(text)?;
        if sentences.is_empty() {
            return Err(ParseTreeError::NoSentenceParsed { text: text.to_string() });
        }
        if sentences.len() > 1 {
            tracing::debug!("Ignoring {} sentence(s) after the first", sentences.len() - 1);
        }
        Ok(sentences.swap_remove(0))
    }

    pub fn process(&self, question: &Question) -> Result<MutableTree> {
        let normalized = self.normalize(question)?;

        let text = if self.config.parse_normalized {
            normalized.as_str()
        } else {
            english_text(question)?
        };

        let graph = self.parse(text)?;
        let tree  = self.converter.convert(&graph)?;
        tracing::debug!("{}", tree);

        Ok(tree)
    }
}

impl<A: TextAnnotator> QuestionTreeParser for QuestionParser<A> {
    type Error = ParseTreeError;

    fn process(&self, question: &Question) -> Result<MutableTree> {
        QuestionParser::process(self, question)
    }
}

/// Both substitution passes over the English text: named
/// entities first, then noun phrases, each seeing the output
/// of the one before.
pub fn normalize_question(question: &Question, mode: MatchMode) -> Result<String> {
    let mut sentence = english_text(question)?.to_string();

    let named = question.named_entities(ENGLISH);
    if !named.is_empty() {
        sentence = replace_labels_by_uris(&sentence, named, mode);
        tracing::debug!("{}", sentence);
    }
    let nouns = question.noun_phrases(ENGLISH);
    if !nouns.is_empty() {
        sentence = replace_labels_by_uris(&sentence, nouns, mode);
        tracing::debug!("{}", sentence);
    }

    Ok(sentence)
}

fn english_text(question: &Question) -> Result<&str> {
    question
        .text(ENGLISH)
        .ok_or_else(|| ParseTreeError::MissingQuestionText { language: ENGLISH.to_string() })
}
