// ============================================================
// Layer 4 — Text Processing
// ============================================================
// Turns question text into what the parser needs and reads
// what the parser gives back:
//
//   question text
//       │
//       ▼
//   normalizer  → replaces resolved mention labels with URIs
//       │
//       ▼
//   (annotator)
//       │
//       ▼
//   conllu      → reads CoNLL-U output into DependencyGraphs

/// Label-to-URI substitution over question text
pub mod normalizer;

/// CoNLL-U reader producing one DependencyGraph per sentence
pub mod conllu;
