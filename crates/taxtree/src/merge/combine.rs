//! End-to-end combination of several trees into one.

use serde::Serialize;

use crate::error::{Result, TaxTreeError};
use crate::tree::Tree;

use super::augment::augment_tree;
use super::counts::{CountAggregation, NameIndex, aggregate_counts};

/// Result of combining several trees.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedTree {
    /// The merged tree with aggregated counts.
    pub tree: Tree,
    /// Number of input trees.
    pub input_trees: usize,
    /// Total nodes across all inputs, counting repeats.
    pub input_nodes: usize,
    /// Distinct names across all inputs.
    pub distinct_names: usize,
    /// Strategy used for counts.
    pub aggregation: CountAggregation,
}

impl CombinedTree {
    /// Number of nodes in the merged tree.
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }
}

/// Merge trees with the first as base, then aggregate counts per name.
///
/// # Errors
///
/// Returns [`TaxTreeError::EmptyInput`] when `trees` is empty, and any
/// structural error raised by [`augment_tree`].
///
/// # Example
///
/// ```
/// use taxtree::{CountAggregation, Node, Tree, combine_trees};
///
/// let runs = vec![
///     Tree::from(Node::leaf("Bacteria", "superkingdom", 10.0)),
///     Tree::from(Node::leaf("Bacteria", "superkingdom", 30.0)),
/// ];
/// let combined = combine_trees(&runs, CountAggregation::Mean).unwrap();
/// assert_eq!(combined.tree.roots()[0].count, 20.0);
/// ```
pub fn combine_trees(trees: &[Tree], aggregation: CountAggregation) -> Result<CombinedTree> {
    let (base, others) = trees.split_first().ok_or_else(|| {
        TaxTreeError::EmptyInput("at least one tree is required to combine".to_string())
    })?;

    let mut merged = augment_tree(base, others)?;
    let index = NameIndex::from_trees(trees)?;
    aggregate_counts(&mut merged, &index, aggregation);

    Ok(CombinedTree {
        tree: merged,
        input_trees: index.tree_count(),
        input_nodes: index.total_nodes(),
        distinct_names: index.len(),
        aggregation,
    })
}
