// ============================================================
// Layer 3 — Mutable Parse Tree
// ============================================================
// The explicit tree handed to the rest of the QA pipeline.
//
// Ownership:
//   MutableTree
//     └── head: MutableTreeNode          (owned)
//           └── children: Vec<MutableTreeNode>   (owned)
//
// A node's parent is stored as the parent's node number, not
// a pointer, so the tree has no ownership cycles and still
// serialises as plain nested JSON.
//
// Node numbers are assigned in pre-order starting at 0, so
// they double as stable node identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Relation label carried by the head node.
pub const ROOT_LABEL: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutableTreeNode {
    pub word:        String,
    pub pos_tag:     String,
    /// Short name of the relation on the edge from the parent.
    pub label:       String,
    /// Node number of the parent; `None` for the head.
    pub parent:      Option<usize>,
    pub node_number: usize,
    pub lemma:       String,
    #[serde(default)]
    pub children:    Vec<MutableTreeNode>,
}

impl MutableTreeNode {
    pub fn new(
        word:        impl Into<String>,
        pos_tag:     impl Into<String>,
        label:       impl Into<String>,
        parent:      Option<usize>,
        node_number: usize,
        lemma:       impl Into<String>,
    ) -> Self {
        Self {
            word:     word.into(),
            pos_tag:  pos_tag.into(),
            label:    label.into(),
            parent,
            node_number,
            lemma:    lemma.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: MutableTreeNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(
            f,
            "{:indent$}{} {} {} {}",
            "",
            self.word,
            self.pos_tag,
            self.label,
            self.lemma,
            indent = depth * 2
        )?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutableTree {
    pub head: MutableTreeNode,
}

impl MutableTree {
    pub fn new(head: MutableTreeNode) -> Self {
        Self { head }
    }

    pub fn head(&self) -> &MutableTreeNode {
        &self.head
    }

    /// Walk every node, parents before children, siblings in order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![&self.head] }
    }

    pub fn len(&self) -> usize {
        self.pre_order().count()
    }

    /// A tree always holds at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Find a node by its pre-order number.
    pub fn node(&self, node_number: usize) -> Option<&MutableTreeNode> {
        self.pre_order().find(|n| n.node_number == node_number)
    }

    pub fn parent_of(&self, node: &MutableTreeNode) -> Option<&MutableTreeNode> {
        node.parent.and_then(|p| self.node(p))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Textual dump: one node per line, `word tag label lemma`,
/// indented two spaces per level.
impl fmt::Display for MutableTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.head.write_indented(f, 0)
    }
}

pub struct PreOrder<'a> {
    stack: Vec<&'a MutableTreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a MutableTreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// born(0) → activist(1) → Which(2); born → Mvezo(3)
    fn sample() -> MutableTree {
        let mut head     = MutableTreeNode::new("born", "VBN", ROOT_LABEL, None, 0, "bear");
        let mut activist = MutableTreeNode::new("activist", "NN", "nsubjpass", Some(0), 1, "activist");
        activist.add_child(MutableTreeNode::new("Which", "WDT", "det", Some(1), 2, "which"));
        head.add_child(activist);
        head.add_child(MutableTreeNode::new("Mvezo", "NNP", "nmod", Some(0), 3, "Mvezo"));
        MutableTree::new(head)
    }

    #[test]
    fn test_pre_order_visits_parents_first() {
        let tree    = sample();
        let numbers: Vec<usize> = tree.pre_order().map(|n| n.node_number).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_parent_lookup() {
        let tree  = sample();
        let which = tree.node(2).unwrap();
        assert_eq!(tree.parent_of(which).unwrap().word, "activist");
        assert!(tree.parent_of(tree.head()).is_none());
        assert!(tree.node(9).is_none());
    }

    #[test]
    fn test_display_dump() {
        let dump = sample().to_string();
        let expected = "born VBN root bear\n  activist NN nsubjpass activist\n    Which WDT det which\n  Mvezo NNP nmod Mvezo\n";
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_json_keeps_nesting() {
        let tree = sample();
        let json = tree.to_json().unwrap();
        let back: MutableTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back.head.children[0].children[0].word, "Which");
        assert_eq!(back.head.parent, None);
    }
}
