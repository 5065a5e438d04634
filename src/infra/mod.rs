// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concrete TextAnnotator backends. Both speak CoNLL-U and are
// built once, then reused for every question:
//
//   corpus_annotator.rs  — loads a pre-parsed CoNLL-U corpus
//                          and looks sentences up by text.
//
//   command_annotator.rs — runs an external parser command,
//                          feeding text on stdin and reading
//                          CoNLL-U from stdout.

/// Pre-parsed CoNLL-U corpus lookup
pub mod corpus_annotator;

/// External parser process
pub mod command_annotator;
