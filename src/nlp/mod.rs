// ============================================================
// Layer 5 — Parse Tree Construction
// ============================================================
// Turns the dependency graph of one sentence into the owned
// MutableTree the QA pipeline traverses.

/// Depth-first graph-to-tree conversion
pub mod converter;
