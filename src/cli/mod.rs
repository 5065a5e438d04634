// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, builds the annotator once, and
// hands the question to Layer 2. Printing happens only here.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use commands::{Commands, ConfigArgs, NormalizeArgs, ParseArgs, QuestionArgs};

use crate::application::parse_use_case::{normalize_question, ParseConfig, QuestionParser};
use crate::domain::{
    question::{Question, ENGLISH},
    traits::TextAnnotator,
};
use crate::infra::{command_annotator::CommandAnnotator, corpus_annotator::ConlluCorpusAnnotator};

#[derive(Parser, Debug)]
#[command(
    name = "question-parse-tree",
    version,
    about = "Replace resolved entity mentions in a question and print its dependency parse tree."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the subcommand; this layer only routes and prints.
    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Parse(args)     => self.run_parse(args),
            Commands::Normalize(args) => self.run_normalize(args),
        }
    }

    /// Handles the `parse` subcommand.
    /// Builds the annotator once and prints the tree dump or JSON.
    fn run_parse(&self, args: &ParseArgs) -> Result<()> {
        let question  = load_question(&args.question)?;
        let config    = load_config(&args.config)?;
        let annotator = build_annotator(args)?;

        tracing::debug!("Parsing with {:?}", config);
        let parser = QuestionParser::new(annotator, config);
        let tree   = parser.process(&question)?;

        if args.json {
            println!("{}", tree.to_json()?);
        } else {
            print!("{tree}");
        }
        Ok(())
    }

    /// Handles the `normalize` subcommand.
    fn run_normalize(&self, args: &NormalizeArgs) -> Result<()> {
        let question = load_question(&args.question)?;
        let sentence = normalize_question(&question, args.match_mode.into())?;
        println!("{sentence}");
        Ok(())
    }
}

/// Question from --question-file or --question, with any
/// --entity / --noun-phrase mentions appended.
fn load_question(args: &QuestionArgs) -> Result<Question> {
    let mut question = match (&args.question_file, &args.question) {
        (Some(path), _)    => Question::load(path)?,
        (None, Some(text)) => Question::english(text.clone()),
        (None, None)       => bail!("Either --question or --question-file is required"),
    };

    if !args.entities.is_empty() {
        question
            .language_to_named_entities
            .entry(ENGLISH.to_string())
            .or_default()
            .extend(args.entities.iter().cloned());
    }
    if !args.noun_phrases.is_empty() {
        question
            .language_to_noun_phrases
            .entry(ENGLISH.to_string())
            .or_default()
            .extend(args.noun_phrases.iter().cloned());
    }

    Ok(question)
}

fn load_config(args: &ConfigArgs) -> Result<ParseConfig> {
    match &args.config {
        Some(path) => ParseConfig::load(path),
        None       => Ok(ParseConfig::from(args)),
    }
}

fn build_annotator(args: &ParseArgs) -> Result<Box<dyn TextAnnotator>> {
    match (&args.conllu, &args.annotator_cmd) {
        (Some(path), _) => Ok(Box::new(ConlluCorpusAnnotator::from_path(path)?)),
        (None, Some(program)) => Ok(Box::new(CommandAnnotator::new(
            program,
            args.annotator_args.clone(),
        )?)),
        (None, None) => bail!("Either --conllu or --annotator-cmd is required"),
    }
}
