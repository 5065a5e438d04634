// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The linguistic pipeline is a black box behind TextAnnotator.
// The application layer only sees the trait, so tests can swap
// in an annotator that returns fixed graphs.
//
// Implementations:
//   - ConlluCorpusAnnotator → looks sentences up in a pre-parsed corpus
//   - CommandAnnotator      → runs an external parser per call

use anyhow::Result;

use crate::domain::{dependency::DependencyGraph, question::Question, tree::MutableTree};

/// Annotators the pipeline is always configured with, in order.
/// Not overridable.
pub const ANNOTATORS: &[&str] = &[
    "tokenize", "ssplit", "pos", "lemma", "ner", "parse", "dcoref",
];

// ─── TextAnnotator ────────────────────────────────────────────────────────────
/// Anything that turns raw text into one dependency graph per sentence.
///
/// Construction is expected to be expensive; build one instance
/// and reuse it. Implementations are not assumed to be reentrant.
pub trait TextAnnotator {
    /// Annotate `text`. An empty Vec means no sentence was found.
    fn annotate(&self, text: &str) -> Result<Vec<DependencyGraph>>;
}

impl<T: TextAnnotator + ?Sized> TextAnnotator for &T {
    fn annotate(&self, text: &str) -> Result<Vec<DependencyGraph>> {
        (**self).annotate(text)
    }
}

impl<T: TextAnnotator + ?Sized> TextAnnotator for Box<T> {
    fn annotate(&self, text: &str) -> Result<Vec<DependencyGraph>> {
        (**self).annotate(text)
    }
}

// ─── QuestionTreeParser ───────────────────────────────────────────────────────
/// Any component that produces a parse tree for a question.
pub trait QuestionTreeParser {
    type Error;

    fn process(&self, question: &Question) -> std::result::Result<MutableTree, Self::Error>;
}
