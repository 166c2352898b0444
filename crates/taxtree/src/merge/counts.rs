//! Combining counts across the trees that fed a merge.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tree::{Node, Tree, collect_all_nodes};

/// Every occurrence of each name across a set of trees.
///
/// Names are kept in first-encounter order.
#[derive(Debug, Clone)]
pub struct NameIndex<'a> {
    occurrences: IndexMap<&'a str, Vec<&'a Node>>,
    total_nodes: usize,
    tree_count: usize,
}

impl<'a> NameIndex<'a> {
    /// Index all nodes of the given trees by name.
    ///
    /// Fails if any node has an empty name.
    pub fn from_trees(trees: &'a [Tree]) -> Result<Self> {
        let mut occurrences: IndexMap<&'a str, Vec<&'a Node>> = IndexMap::new();
        let mut total_nodes = 0;

        for tree in trees {
            let nodes = collect_all_nodes(tree)?;
            total_nodes += nodes.len();
            for node in nodes {
                occurrences.entry(node.name.as_str()).or_default().push(node);
            }
        }

        Ok(Self {
            occurrences,
            total_nodes,
            tree_count: trees.len(),
        })
    }

    /// All occurrences of a name, in tree order.
    pub fn get(&self, name: &str) -> Option<&[&'a Node]> {
        self.occurrences.get(name).map(Vec::as_slice)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// Whether no names were indexed.
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Number of nodes indexed, counting repeats.
    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    /// Number of trees indexed.
    pub fn tree_count(&self) -> usize {
        self.tree_count
    }

    /// Iterate names with their occurrences.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Node])> + '_ {
        self.occurrences.iter().map(|(name, nodes)| (*name, nodes.as_slice()))
    }
}

/// How to combine the counts of one name seen in several trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountAggregation {
    /// Mean over the trees in which the name occurs.
    #[default]
    Mean,
    /// Sum over all occurrences.
    Sum,
    /// Largest observed count.
    Max,
    /// Leave the count chosen by the merge untouched.
    Keep,
}

impl CountAggregation {
    /// Combine the given counts. Returns `None` when there is nothing to
    /// combine or the strategy keeps the existing value.
    pub fn combine(&self, counts: &[f64]) -> Option<f64> {
        if counts.is_empty() {
            return None;
        }
        match self {
            CountAggregation::Mean => Some(counts.iter().sum::<f64>() / counts.len() as f64),
            CountAggregation::Sum => Some(counts.iter().sum()),
            CountAggregation::Max => counts.iter().copied().reduce(f64::max),
            CountAggregation::Keep => None,
        }
    }
}

/// Replace each merged node's count with the aggregate of its occurrences.
///
/// Nodes whose name is absent from `index` keep their current count.
pub fn aggregate_counts(merged: &mut Tree, index: &NameIndex<'_>, aggregation: CountAggregation) {
    merged.for_each_node_mut(|node| {
        let Some(occurrences) = index.get(node.name.as_str()) else {
            return;
        };
        let counts: Vec<f64> = occurrences.iter().map(|n| n.count).collect();
        if let Some(count) = aggregation.combine(&counts) {
            node.count = count;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trees() -> Vec<Tree> {
        vec![
            Tree::from(Node::with_children(
                "Bacteria",
                "superkingdom",
                10.0,
                vec![Node::leaf("Firmicutes", "phylum", 10.0)],
            )),
            Tree::from(Node::with_children(
                "Bacteria",
                "superkingdom",
                30.0,
                vec![Node::leaf("Bacteroidetes", "phylum", 30.0)],
            )),
        ]
    }

    #[test]
    fn test_index_counts() {
        let trees = trees();
        let index = NameIndex::from_trees(&trees).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.total_nodes(), 4);
        assert_eq!(index.tree_count(), 2);
        assert_eq!(index.get("Bacteria").unwrap().len(), 2);
        assert_eq!(index.get("Firmicutes").unwrap().len(), 1);
        assert!(index.get("Archaea").is_none());

        let order: Vec<_> = index.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["Bacteria", "Firmicutes", "Bacteroidetes"]);
    }

    #[test]
    fn test_index_rejects_empty_names() {
        let trees = vec![Tree::from(Node::leaf("", "species", 1.0))];
        assert!(NameIndex::from_trees(&trees).is_err());
    }

    #[test]
    fn test_combine_strategies() {
        let counts = [10.0, 30.0];
        assert_eq!(CountAggregation::Mean.combine(&counts), Some(20.0));
        assert_eq!(CountAggregation::Sum.combine(&counts), Some(40.0));
        assert_eq!(CountAggregation::Max.combine(&counts), Some(30.0));
        assert_eq!(CountAggregation::Keep.combine(&counts), None);
        assert_eq!(CountAggregation::Mean.combine(&[]), None);
    }

    #[test]
    fn test_mean_is_over_occurrences() {
        let trees = trees();
        let index = NameIndex::from_trees(&trees).unwrap();
        let mut merged = Tree::from(Node::with_children(
            "Bacteria",
            "superkingdom",
            10.0,
            vec![
                Node::leaf("Firmicutes", "phylum", 10.0),
                Node::leaf("Bacteroidetes", "phylum", 30.0),
            ],
        ));

        aggregate_counts(&mut merged, &index, CountAggregation::Mean);

        let root = &merged.roots()[0];
        assert_eq!(root.count, 20.0);
        // present in one tree only: mean of a single occurrence
        assert_eq!(root.children[0].count, 10.0);
        assert_eq!(root.children[1].count, 30.0);
    }

    #[test]
    fn test_unknown_names_keep_count() {
        let trees = trees();
        let index = NameIndex::from_trees(&trees).unwrap();
        let mut merged = Tree::from(Node::leaf("Archaea", "superkingdom", 7.0));
        aggregate_counts(&mut merged, &index, CountAggregation::Sum);
        assert_eq!(merged.roots()[0].count, 7.0);
    }
}
