// ============================================================
// Layer 3 — Dependency Graph Domain Types
// ============================================================
// What an annotator returns for one sentence:
//
//   born ──nsubjpass──▶ activist ──det──▶ Which
//     │
//     └──nmod:in──▶ Mvezo ──case──▶ in
//
// Tokens carry their 1-based position in the sentence, which
// is how edges refer to them. Child order is the order edges
// were added, i.e. whatever order the parser emitted them in.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// 1-based token position within a sentence.
pub type TokenId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub index: TokenId,
    pub word:  String,
    pub tag:   String,
    pub lemma: String,
}

impl Token {
    pub fn new(
        index: TokenId,
        word:  impl Into<String>,
        tag:   impl Into<String>,
        lemma: impl Into<String>,
    ) -> Self {
        Self {
            index,
            word:  word.into(),
            tag:   tag.into(),
            lemma: lemma.into(),
        }
    }
}

/// A grammatical relation such as `nsubj` or `nmod:in`.
///
/// Collapsed relations carry a specific part after the colon.
/// Tree labels only use the short name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub short_name: String,
    pub specific:   Option<String>,
}

impl Relation {
    /// Split a relation string on its first `:`.
    pub fn parse(name: &str) -> Self {
        match name.split_once(':') {
            Some((short, specific)) if !specific.is_empty() => Self {
                short_name: short.to_string(),
                specific:   Some(specific.to_string()),
            },
            Some((short, _)) => Self {
                short_name: short.to_string(),
                specific:   None,
            },
            None => Self {
                short_name: name.to_string(),
                specific:   None,
            },
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.specific {
            Some(specific) => write!(f, "{}:{}", self.short_name, specific),
            None           => write!(f, "{}", self.short_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub governor:  TokenId,
    pub dependent: TokenId,
    pub relation:  Relation,
}

/// Dependency graph for a single sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// Sentence text, when the parser reported it.
    pub text: Option<String>,
    tokens:   BTreeMap<TokenId, Token>,
    roots:    Vec<TokenId>,
    edges:    Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Insert a token, replacing any token already stored at its index.
    pub fn add_token(&mut self, token: Token) {
        self.tokens.insert(token.index, token);
    }

    pub fn add_root(&mut self, id: TokenId) {
        self.roots.push(id);
    }

    pub fn add_edge(&mut self, governor: TokenId, dependent: TokenId, relation: Relation) {
        self.edges.push(DependencyEdge { governor, dependent, relation });
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(&id)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn roots(&self) -> &[TokenId] {
        &self.roots
    }

    /// The designated sentence root. Additional roots are ignored.
    pub fn first_root(&self) -> Option<TokenId> {
        self.roots.first().copied()
    }

    pub fn has_children(&self, id: TokenId) -> bool {
        self.edges.iter().any(|e| e.governor == id)
    }

    /// Dependents of `id` in edge insertion order, each once.
    pub fn children(&self, id: TokenId) -> impl Iterator<Item = TokenId> + '_ {
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .filter(move |e| e.governor == id && seen.insert(e.dependent))
            .map(|e| e.dependent)
    }

    pub fn edge(&self, governor: TokenId, dependent: TokenId) -> Option<&DependencyEdge> {
        self.edges
            .iter()
            .find(|e| e.governor == governor && e.dependent == dependent)
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_short_name() {
        let r = Relation::parse("nmod:in");
        assert_eq!(r.short_name, "nmod");
        assert_eq!(r.specific.as_deref(), Some("in"));
        assert_eq!(r.to_string(), "nmod:in");

        let r = Relation::parse("nsubj");
        assert_eq!(r.short_name, "nsubj");
        assert!(r.specific.is_none());
    }

    #[test]
    fn test_children_follow_insertion_order() {
        let mut g = DependencyGraph::new();
        for (i, w) in ["a", "b", "c"].iter().enumerate() {
            g.add_token(Token::new(i + 1, *w, "X", *w));
        }
        g.add_root(2);
        g.add_edge(2, 3, Relation::parse("obj"));
        g.add_edge(2, 1, Relation::parse("nsubj"));

        let kids: Vec<TokenId> = g.children(2).collect();
        assert_eq!(kids, vec![3, 1]);
        assert!(g.has_children(2));
        assert!(!g.has_children(1));
        assert_eq!(g.edge(2, 1).unwrap().relation.short_name, "nsubj");
        assert!(g.edge(1, 2).is_none());
    }

    #[test]
    fn test_repeated_edge_yields_child_once() {
        let mut g = DependencyGraph::new();
        g.add_token(Token::new(1, "a", "X", "a"));
        g.add_token(Token::new(2, "c", "X", "c"));
        g.add_root(1);
        g.add_edge(1, 2, Relation::parse("obj"));
        g.add_edge(1, 2, Relation::parse("dep"));

        let kids: Vec<TokenId> = g.children(1).collect();
        assert_eq!(kids, vec![2]);
        assert_eq!(g.edge(1, 2).unwrap().relation.short_name, "obj");
    }

    #[test]
    fn test_first_root_of_empty_graph() {
        assert_eq!(DependencyGraph::new().first_root(), None);
    }
}
