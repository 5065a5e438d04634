// ============================================================
// Layer 5 — Graph-to-Tree Converter
// ============================================================
// Walks a DependencyGraph depth-first from its first root and
// rebuilds it as a MutableTree:
//
//   1. The root token becomes node 0 with label "root".
//   2. Every child, in the order the graph yields them, gets
//      the next node number, the short name of its incoming
//      relation, and its parent's node number.
//   3. Descend into the child before moving to its sibling,
//      so node numbers follow pre-order.
//
// The graph is expected to be a rooted tree. There is no
// cycle detection; instead depth is bounded and a graph that
// goes deeper is rejected as malformed. The walk keeps its own
// stack, so the bound, not the call stack, is the only limit.

use crate::domain::{
    dependency::{DependencyGraph, TokenId},
    tree::{MutableTree, MutableTreeNode, ROOT_LABEL},
};
use crate::error::{ParseTreeError, Result};

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Hard ceiling for the depth bound. Built trees are nested
/// values, so dropping or printing one recurses once per level.
/// Config files and CLI flags above it are rejected.
pub const MAX_DEPTH_LIMIT: usize = 1024;

pub struct TreeConverter {
    max_depth: usize,
}

/// A token waiting to be visited.
struct Pending {
    token:  TokenId,
    parent: usize,
    label:  String,
    level:  usize,
}

impl TreeConverter {
    /// Bounds above MAX_DEPTH_LIMIT are lowered to it.
    pub fn new(max_depth: usize) -> Self {
        if max_depth > MAX_DEPTH_LIMIT {
            tracing::warn!(
                "max_depth {} exceeds the limit of {}; using the limit",
                max_depth,
                MAX_DEPTH_LIMIT
            );
        }
        Self { max_depth: max_depth.min(MAX_DEPTH_LIMIT) }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn convert(&self, graph: &DependencyGraph) -> Result<MutableTree> {
        let root_id = graph
            .first_root()
            .ok_or_else(|| ParseTreeError::MalformedGraph("graph has no root".to_string()))?;
        let root = graph.token(root_id).ok_or_else(|| {
            ParseTreeError::MalformedGraph(format!("root {root_id} is not a token of the graph"))
        })?;

        // Nodes in pre-order, children still detached; index == node number.
        let mut nodes = vec![MutableTreeNode::new(
            &root.word,
            &root.tag,
            ROOT_LABEL,
            None,
            0,
            &root.lemma,
        )];
        let mut stack = Vec::new();
        self.push_children(graph, root_id, 0, 0, &mut stack)?;

        while let Some(next) = stack.pop() {
            let token = graph.token(next.token).ok_or_else(|| {
                ParseTreeError::MalformedGraph(format!(
                    "dependent {} is not a token of the graph",
                    next.token
                ))
            })?;

            let node_number = nodes.len();
            nodes.push(MutableTreeNode::new(
                &token.word,
                &token.tag,
                next.label,
                Some(next.parent),
                node_number,
                &token.lemma,
            ));
            self.push_children(graph, next.token, node_number, next.level, &mut stack)?;
        }

        Ok(MutableTree::new(assemble(nodes)))
    }

    /// Queue the dependents of `token` so they pop off in graph order.
    fn push_children(
        &self,
        graph:       &DependencyGraph,
        token:       TokenId,
        node_number: usize,
        level:       usize,
        stack:       &mut Vec<Pending>,
    ) -> Result<()> {
        if !graph.has_children(token) {
            return Ok(());
        }
        if level + 1 > self.max_depth {
            return Err(ParseTreeError::MalformedGraph(format!(
                "tree deeper than {} levels below token {token}; is the graph cyclic?",
                self.max_depth
            )));
        }

        let mut queued = Vec::new();
        for child_id in graph.children(token) {
            let edge = graph.edge(token, child_id).ok_or_else(|| {
                ParseTreeError::MalformedGraph(format!("no edge from {token} to {child_id}"))
            })?;
            queued.push(Pending {
                token:  child_id,
                parent: node_number,
                label:  edge.relation.short_name.clone(),
                level:  level + 1,
            });
        }
        stack.extend(queued.into_iter().rev());
        Ok(())
    }
}

/// Nest flat pre-order nodes under their parents.
///
/// Walking backwards, every descendant of a node is already
/// attached by the time the node itself is moved.
fn assemble(nodes: Vec<MutableTreeNode>) -> MutableTreeNode {
    let mut slots: Vec<Option<MutableTreeNode>> = nodes.into_iter().map(Some).collect();

    for i in (1..slots.len()).rev() {
        let Some(mut node) = slots[i].take() else { continue };
        node.children.reverse();
        let Some(p) = node.parent else { continue };
        if let Some(Some(parent)) = slots.get_mut(p) {
            parent.children.push(node);
        }
    }

    let mut head = slots
        .into_iter()
        .next()
        .flatten()
        .unwrap_or_else(|| MutableTreeNode::new("", "", ROOT_LABEL, None, 0, ""));
    head.children.reverse();
    head
}

impl Default for TreeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dependency::{Relation, Token};

    /// born ─┬─ activist ─┬─ Which
    ///       │            └─ anti-apartheid
    ///       ├─ was
    ///       ├─ Mvezo ── in
    ///       └─ ?
    fn mvezo_graph() -> DependencyGraph {
        let mut g = DependencyGraph::new();
        let tokens = [
            ("Which", "WDT", "which"),
            ("anti-apartheid", "JJ", "anti-apartheid"),
            ("activist", "NN", "activist"),
            ("was", "VBD", "be"),
            ("born", "VBN", "bear"),
            ("in", "IN", "in"),
            ("Mvezo", "NNP", "Mvezo"),
            ("?", ".", "?"),
        ];
        for (i, (w, t, l)) in tokens.iter().enumerate() {
            g.add_token(Token::new(i + 1, *w, *t, *l));
        }
        g.add_root(5);
        g.add_edge(3, 1, Relation::parse("det"));
        g.add_edge(3, 2, Relation::parse("amod"));
        g.add_edge(5, 3, Relation::parse("nsubjpass"));
        g.add_edge(5, 4, Relation::parse("auxpass"));
        g.add_edge(7, 6, Relation::parse("case"));
        g.add_edge(5, 7, Relation::parse("nmod:in"));
        g.add_edge(5, 8, Relation::parse("punct"));
        g
    }

    #[test]
    fn test_root_identity() {
        let tree = TreeConverter::default().convert(&mvezo_graph()).unwrap();
        assert_eq!(tree.head.word, "born");
        assert_eq!(tree.head.pos_tag, "VBN");
        assert_eq!(tree.head.lemma, "bear");
        assert_eq!(tree.head.label, ROOT_LABEL);
        assert_eq!(tree.head.parent, None);
        assert_eq!(tree.head.node_number, 0);
    }

    #[test]
    fn test_numbers_follow_pre_order() {
        let tree = TreeConverter::default().convert(&mvezo_graph()).unwrap();
        let visited: Vec<(usize, &str)> = tree
            .pre_order()
            .map(|n| (n.node_number, n.word.as_str()))
            .collect();
        assert_eq!(
            visited,
            vec![
                (0, "born"),
                (1, "activist"),
                (2, "Which"),
                (3, "anti-apartheid"),
                (4, "was"),
                (5, "Mvezo"),
                (6, "in"),
                (7, "?"),
            ]
        );
    }

    #[test]
    fn test_labels_and_parents() {
        let tree = TreeConverter::default().convert(&mvezo_graph()).unwrap();
        let labels: Vec<&str> = tree.head.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["nsubjpass", "auxpass", "nmod", "punct"]);

        let mvezo = tree.node(5).unwrap();
        assert_eq!(mvezo.parent, Some(0));
        assert_eq!(mvezo.children[0].parent, Some(5));
        assert_eq!(mvezo.children[0].label, "case");
    }

    #[test]
    fn test_size_matches_reachable_tokens() {
        let mut g = mvezo_graph();
        // unattached token is not reachable from the root
        g.add_token(Token::new(9, "stray", "NN", "stray"));
        let tree = TreeConverter::default().convert(&g).unwrap();
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn test_repeated_edge_gives_one_node() {
        let mut g = DependencyGraph::new();
        g.add_token(Token::new(1, "a", "X", "a"));
        g.add_token(Token::new(2, "c", "X", "c"));
        g.add_root(1);
        g.add_edge(1, 2, Relation::parse("obj"));
        g.add_edge(1, 2, Relation::parse("dep"));

        let tree = TreeConverter::default().convert(&g).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.head.children[0].label, "obj");
    }

    #[test]
    fn test_single_token_graph() {
        let mut g = DependencyGraph::new();
        g.add_token(Token::new(1, "Hello", "UH", "hello"));
        g.add_root(1);
        let tree = TreeConverter::default().convert(&g).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.head.is_leaf());
    }

    #[test]
    fn test_missing_root_is_malformed() {
        let mut g = DependencyGraph::new();
        g.add_token(Token::new(1, "x", "X", "x"));
        assert!(matches!(
            TreeConverter::default().convert(&g),
            Err(ParseTreeError::MalformedGraph(_))
        ));
    }

    #[test]
    fn test_unknown_dependent_is_malformed() {
        let mut g = DependencyGraph::new();
        g.add_token(Token::new(1, "x", "X", "x"));
        g.add_root(1);
        g.add_edge(1, 4, Relation::parse("dep"));
        assert!(matches!(
            TreeConverter::default().convert(&g),
            Err(ParseTreeError::MalformedGraph(_))
        ));
    }

    #[test]
    fn test_cycle_hits_depth_bound() {
        let mut g = DependencyGraph::new();
        g.add_token(Token::new(1, "a", "X", "a"));
        g.add_token(Token::new(2, "b", "X", "b"));
        g.add_root(1);
        g.add_edge(1, 2, Relation::parse("dep"));
        g.add_edge(2, 1, Relation::parse("dep"));

        let err = TreeConverter::new(16).convert(&g).unwrap_err();
        assert!(matches!(err, ParseTreeError::MalformedGraph(_)));
    }

    #[test]
    fn test_cycle_with_large_bound_is_malformed() {
        let mut g = DependencyGraph::new();
        g.add_token(Token::new(1, "a", "X", "a"));
        g.add_token(Token::new(2, "b", "X", "b"));
        g.add_root(1);
        g.add_edge(1, 2, Relation::parse("dep"));
        g.add_edge(2, 1, Relation::parse("dep"));

        let converter = TreeConverter::new(20_000);
        assert_eq!(converter.max_depth(), MAX_DEPTH_LIMIT);
        assert!(matches!(converter.convert(&g), Err(ParseTreeError::MalformedGraph(_))));
    }

    #[test]
    fn test_deep_chain_within_limit() {
        let mut g = DependencyGraph::new();
        for i in 1..=MAX_DEPTH_LIMIT + 1 {
            g.add_token(Token::new(i, "w", "X", "w"));
        }
        g.add_root(1);
        for i in 1..=MAX_DEPTH_LIMIT {
            g.add_edge(i, i + 1, Relation::parse("dep"));
        }

        let tree = TreeConverter::new(MAX_DEPTH_LIMIT).convert(&g).unwrap();
        assert_eq!(tree.len(), MAX_DEPTH_LIMIT + 1);
        assert_eq!(tree.node(MAX_DEPTH_LIMIT).unwrap().parent, Some(MAX_DEPTH_LIMIT - 1));
    }

    #[test]
    fn test_depth_bound_allows_exact_depth() {
        // chain 1 → 2 → 3 is two levels below the root
        let mut g = DependencyGraph::new();
        for i in 1..=3 {
            g.add_token(Token::new(i, format!("w{i}"), "X", format!("w{i}")));
        }
        g.add_root(1);
        g.add_edge(1, 2, Relation::parse("dep"));
        g.add_edge(2, 3, Relation::parse("dep"));

        assert!(TreeConverter::new(2).convert(&g).is_ok());
        assert!(TreeConverter::new(1).convert(&g).is_err());
    }
}
