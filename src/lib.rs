//! Turns a question into an owned dependency parse tree.
//!
//! Mention labels already resolved to URIs are substituted into
//! the question text, the text is handed to a [`TextAnnotator`],
//! and the first sentence's dependency graph is rebuilt as a
//! [`MutableTree`] whose node numbers follow pre-order.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod nlp;

pub use application::parse_use_case::{ParseConfig, QuestionParser};
pub use data::normalizer::MatchMode;
pub use domain::{
    dependency::{DependencyGraph, Relation, Token, TokenId},
    question::{Entity, Question},
    traits::{QuestionTreeParser, TextAnnotator},
    tree::{MutableTree, MutableTreeNode},
};
pub use error::{ParseTreeError, Result};
