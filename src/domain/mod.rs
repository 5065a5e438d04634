// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing what the system
// works with: questions and their resolved mentions, the
// dependency graphs an annotator hands back, and the owned
// tree we build from them.
//
// Rules for this layer:
//   - NO process spawning or file I/O
//   - NO CLI types
//   - Only plain Rust structs, enums, and traits

// A question with per-language text and resolved mentions
pub mod question;

// Tokens, relations and edges produced by a dependency parser
pub mod dependency;

// The owned, pre-order numbered parse tree
pub mod tree;

// Seams other layers implement (annotators, tree parsers)
pub mod traits;
