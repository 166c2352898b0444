//! The tree (forest of root nodes) type.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::node::Node;

/// A classification tree: one or more root nodes.
///
/// The document form is a JSON list of root records. A single root record
/// is accepted on input and read as a one-root forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    roots: Vec<Node>,
}

impl Tree {
    /// Create a tree from its root nodes.
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    /// Root nodes in stored order.
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Consume the tree, returning its roots.
    pub fn into_roots(self) -> Vec<Node> {
        self.roots
    }

    /// Whether the tree has no roots.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Whole-sample total: the sum of root-level counts.
    ///
    /// Lower ranks are subsets of their ancestors, so only roots are summed.
    pub fn total_count(&self) -> f64 {
        self.roots.iter().map(|n| n.count).sum()
    }

    /// Number of nodes reachable from the roots.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(Node::subtree_size).sum()
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<Node> {
        &mut self.roots
    }

    /// Visit every node mutably in pre-order.
    pub(crate) fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Node),
    {
        let mut stack: Vec<&mut Node> = self.roots.iter_mut().rev().collect();
        while let Some(node) = stack.pop() {
            f(node);
            stack.extend(node.children.iter_mut().rev());
        }
    }
}

impl From<Vec<Node>> for Tree {
    fn from(roots: Vec<Node>) -> Self {
        Self::new(roots)
    }
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Self::new(vec![root])
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            value @ Value::Array(_) => serde_json::from_value::<Vec<Node>>(value)
                .map(Tree::new)
                .map_err(D::Error::custom),
            value @ Value::Object(_) => serde_json::from_value::<Node>(value)
                .map(Tree::from)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom(
                "expected a list of root nodes or a single node record",
            )),
        }
    }
}

/// Deep copy of a tree.
///
/// Every node of the result is freshly allocated; the copy shares no storage
/// with `tree`, so mutating one never affects the other.
pub fn copy_tree(tree: &Tree) -> Tree {
    Tree::new(tree.roots.iter().map(Node::clone).collect())
}
