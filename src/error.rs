//! Error types for question parsing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseTreeError>;

/// Everything that aborts processing of a single question.
///
/// Mentions with an empty label are not errors: they are logged
/// and skipped during normalisation.
#[derive(Debug, Error)]
pub enum ParseTreeError {
    /// The question carries no text for the requested language
    #[error("Question has no text for language '{language}'")]
    MissingQuestionText { language: String },

    /// The annotator returned no sentences
    #[error("No sentence parsed from: {text:?}")]
    NoSentenceParsed { text: String },

    /// The dependency graph is not a rooted tree we can walk
    #[error("Malformed dependency graph: {0}")]
    MalformedGraph(String),

    /// The annotation backend itself failed
    #[error(transparent)]
    Annotator(#[from] anyhow::Error),
}
