//! Comparison of the leaf name sets of two trees.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::tree::{NodeName, Tree, collect_all_nodes};

/// Overlap between the leaves of two trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafComparison {
    /// Number of leaves in the first tree.
    pub leaves_first: usize,
    /// Number of leaves in the second tree.
    pub leaves_second: usize,
    /// Leaf names only in the first tree, sorted.
    pub only_first: Vec<NodeName>,
    /// Leaf names only in the second tree, sorted.
    pub only_second: Vec<NodeName>,
    /// Leaf names in both trees, sorted.
    pub shared: Vec<NodeName>,
}

/// Compare the names of the leaf nodes (nodes without children) of two trees.
pub fn compare_leaves(tree1: &Tree, tree2: &Tree) -> Result<LeafComparison> {
    let leaves1 = leaf_names(tree1)?;
    let leaves2 = leaf_names(tree2)?;

    Ok(LeafComparison {
        leaves_first: leaves1.len(),
        leaves_second: leaves2.len(),
        only_first: leaves1.difference(&leaves2).map(|n| (*n).clone()).collect(),
        only_second: leaves2.difference(&leaves1).map(|n| (*n).clone()).collect(),
        shared: leaves1.intersection(&leaves2).map(|n| (*n).clone()).collect(),
    })
}

fn leaf_names(tree: &Tree) -> Result<BTreeSet<&NodeName>> {
    Ok(collect_all_nodes(tree)?
        .into_iter()
        .filter(|n| n.is_leaf())
        .map(|n| &n.name)
        .collect())
}
