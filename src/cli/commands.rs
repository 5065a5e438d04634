// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   parse      — build and print the parse tree of a question
//   normalize  — print the question with mention labels replaced
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::application::parse_use_case::ParseConfig;
use crate::data::normalizer::MatchMode;
use crate::domain::question::Entity;
use crate::nlp::converter::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a question into a dependency tree
    Parse(ParseArgs),

    /// Print the question with resolved mentions replaced by URIs
    Normalize(NormalizeArgs),
}

/// Where the question and its mentions come from.
#[derive(Args, Debug)]
pub struct QuestionArgs {
    /// English question text
    #[arg(long, conflicts_with = "question_file", required_unless_present = "question_file")]
    pub question: Option<String>,

    /// JSON file holding a full question with mentions
    #[arg(long)]
    pub question_file: Option<PathBuf>,

    /// Named-entity mention as LABEL=URI (repeatable)
    #[arg(long = "entity", value_parser = parse_mention)]
    pub entities: Vec<Entity>,

    /// Noun-phrase mention as LABEL=URI (repeatable)
    #[arg(long = "noun-phrase", value_parser = parse_mention)]
    pub noun_phrases: Vec<Entity>,
}

/// Options shared by every command that normalises or parses.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// JSON parse config; replaces the flags below
    #[arg(long, conflicts_with_all = ["parse_normalized", "match_mode", "max_depth"])]
    pub config: Option<PathBuf>,

    /// Parse the entity-substituted text instead of the original
    #[arg(long)]
    pub parse_normalized: bool,

    /// How mention labels are matched in the question
    #[arg(long, value_enum, default_value_t = MatchModeArg::Substring)]
    pub match_mode: MatchModeArg,

    /// Deepest tree accepted before the graph counts as malformed
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    pub max_depth: usize,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub question: QuestionArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Pre-parsed CoNLL-U corpus to look questions up in
    #[arg(long, conflicts_with = "annotator_cmd", required_unless_present = "annotator_cmd")]
    pub conllu: Option<PathBuf>,

    /// External parser emitting CoNLL-U on stdout
    #[arg(long)]
    pub annotator_cmd: Option<PathBuf>,

    /// Extra argument for the external parser (repeatable)
    #[arg(long = "annotator-arg", requires = "annotator_cmd", allow_hyphen_values = true)]
    pub annotator_args: Vec<String>,

    /// Print the tree as JSON instead of the indented dump
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub question: QuestionArgs,

    /// How mention labels are matched in the question
    #[arg(long, value_enum, default_value_t = MatchModeArg::Substring)]
    pub match_mode: MatchModeArg,
}

/// CLI mirror of MatchMode so the application layer stays clap-free.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchModeArg {
    Substring,
    TokenBoundary,
}

impl From<MatchModeArg> for MatchMode {
    fn from(m: MatchModeArg) -> Self {
        match m {
            MatchModeArg::Substring     => MatchMode::Substring,
            MatchModeArg::TokenBoundary => MatchMode::TokenBoundary,
        }
    }
}

/// Flags → ParseConfig. A --config file is handled by the caller.
impl From<&ConfigArgs> for ParseConfig {
    fn from(a: &ConfigArgs) -> Self {
        ParseConfig {
            parse_normalized: a.parse_normalized,
            match_mode:       a.match_mode.into(),
            max_depth:        a.max_depth,
        }
    }
}

/// Parse `LABEL=URI`. The label may be empty; the URI may not.
fn parse_mention(s: &str) -> Result<Entity, String> {
    let (label, uri) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LABEL=URI, got '{s}'"))?;
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(format!("missing URI in '{s}'"));
    }
    Ok(Entity::new(label, uri))
}

fn parse_max_depth(s: &str) -> Result<usize, String> {
    let depth: usize = s.parse().map_err(|e| format!("'{s}' is not a depth: {e}"))?;
    if depth > MAX_DEPTH_LIMIT {
        return Err(format!("must be at most {MAX_DEPTH_LIMIT}"));
    }
    Ok(depth)
}
