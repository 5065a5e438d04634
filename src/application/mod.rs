// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates normalisation, annotation and tree conversion
// for one question at a time. No printing here (Layer 1) and
// no process or file handling beyond config (Layer 6).

// Question → MutableTree workflow and its configuration
pub mod parse_use_case;
