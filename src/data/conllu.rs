// ============================================================
// Layer 4 — CoNLL-U Reader
// ============================================================
// Reads the tab-separated CoNLL-U format most dependency
// parsers can emit into one DependencyGraph per sentence.
//
// One token per line, ten columns:
//   ID  FORM  LEMMA  UPOS  XPOS  FEATS  HEAD  DEPREL  DEPS  MISC
//
//   # text = Where is Mvezo?
//   1   Where   where   ADV    WRB  _  2  advmod  _  _
//   2   is      be      VERB   VBZ  _  0  root    _  _
//   ...
//   <blank line ends the sentence>
//
// Multiword ranges ("1-2") and empty nodes ("1.1") are skipped.
// The tag is XPOS, falling back to UPOS when XPOS is "_".
// HEAD 0 marks a sentence root.

use thiserror::Error;

use crate::domain::dependency::{DependencyGraph, Relation, Token, TokenId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConlluError {
    #[error("line {line}: expected 10 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidNumber { line: usize, column: &'static str, value: String },

    #[error("line {line}: token id {id} already used in this sentence")]
    DuplicateId { line: usize, id: TokenId },

    #[error("line {line}: head {head} does not name a token in the sentence")]
    UnknownHead { line: usize, head: TokenId },
}

/// A token line waiting for its sentence to finish so heads can be checked.
struct PendingToken {
    line:  usize,
    token: Token,
    head:  TokenId,
    rel:   String,
}

#[derive(Default)]
struct SentenceBuilder {
    text:   Option<String>,
    tokens: Vec<PendingToken>,
}

impl SentenceBuilder {
    fn is_empty(&self) -> bool {
        self.text.is_none() && self.tokens.is_empty()
    }

    fn finish(self) -> Result<Option<DependencyGraph>, ConlluError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let mut graph = DependencyGraph::new();
        graph.text = self.text;
        for pending in &self.tokens {
            if graph.token(pending.token.index).is_some() {
                return Err(ConlluError::DuplicateId { line: pending.line, id: pending.token.index });
            }
            graph.add_token(pending.token.clone());
        }

        for pending in self.tokens {
            if pending.head == 0 {
                graph.add_root(pending.token.index);
                continue;
            }
            if graph.token(pending.head).is_none() {
                return Err(ConlluError::UnknownHead { line: pending.line, head: pending.head });
            }
            graph.add_edge(pending.head, pending.token.index, Relation::parse(&pending.rel));
        }

        Ok(Some(graph))
    }
}

/// Parse CoNLL-U text into sentence graphs, in document order.
pub fn parse_conllu(input: &str) -> Result<Vec<DependencyGraph>, ConlluError> {
    let mut sentences = Vec::new();
    let mut current   = SentenceBuilder::default();

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line    = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            if let Some(graph) = std::mem::take(&mut current).finish()? {
                sentences.push(graph);
            }
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(text) = comment.trim_start().strip_prefix("text") {
                if let Some(value) = text.trim_start().strip_prefix('=') {
                    current.text = Some(value.trim().to_string());
                }
            }
            continue;
        }

        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != 10 {
            return Err(ConlluError::ColumnCount { line: line_no, found: cols.len() });
        }

        // multiword token ranges and empty nodes carry no dependency
        if cols[0].contains('-') || cols[0].contains('.') {
            continue;
        }

        let index = parse_id(cols[0], "ID", line_no)?;
        let head  = parse_id(cols[6], "HEAD", line_no)?;
        let tag   = if cols[4] == "_" { cols[3] } else { cols[4] };

        current.tokens.push(PendingToken {
            line:  line_no,
            token: Token::new(index, cols[1], tag, cols[2]),
            head,
            rel:   cols[7].to_string(),
        });
    }

    if !current.is_empty() {
        if let Some(graph) = current.finish()? {
            sentences.push(graph);
        }
    }

    Ok(sentences)
}

fn parse_id(value: &str, column: &'static str, line: usize) -> Result<TokenId, ConlluError> {
    value.parse().map_err(|_| ConlluError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    })
}
