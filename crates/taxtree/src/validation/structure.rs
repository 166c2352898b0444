//! Structural invariant checks on a single tree.

use std::collections::HashSet;

use crate::error::{NameScope, Result, TaxTreeError, Violation};
use crate::tree::{Node, NodeName, Tree, unnamed_location};

/// Check the structural invariants of a tree.
///
/// Verified in one pre-order walk, stopping at the first failure:
///
/// 1. every node has a non-empty name;
/// 2. no two nodes share a name anywhere in the tree;
/// 3. every node has a single parent (guaranteed by ownership, and a node
///    reachable twice would also be reported as a duplicate name);
/// 4. every count is a non-negative number.
pub fn check_structure(tree: &Tree) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(tree.node_count());
    let mut stack: Vec<(&Node, Option<&NodeName>)> =
        tree.roots().iter().rev().map(|n| (n, None)).collect();

    while let Some((node, parent)) = stack.pop() {
        if node.name.is_empty() {
            return Err(TaxTreeError::structural(
                unnamed_location(parent),
                Violation::EmptyName,
            ));
        }

        if !seen.insert(node.name.as_str()) {
            return Err(TaxTreeError::DuplicateName {
                name: node.name.to_string(),
                scope: NameScope::Tree,
            });
        }

        if node.count.is_nan() || node.count < 0.0 {
            return Err(TaxTreeError::structural(
                format!("'{}' (count {})", node.name, node.count),
                Violation::NegativeCount,
            ));
        }

        stack.extend(node.children.iter().rev().map(|c| (c, Some(&node.name))));
    }

    Ok(())
}

/// Check that every node carries a rank.
pub fn check_ranks(nodes: &[&Node]) -> Result<()> {
    match nodes.iter().find(|n| n.rank.is_none()) {
        Some(node) => Err(TaxTreeError::structural(
            format!("'{}'", node.name),
            Violation::MissingRank,
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_tree() -> Tree {
        Tree::from(Node::with_children(
            "Bacteria",
            "superkingdom",
            10.0,
            vec![
                Node::leaf("Firmicutes", "phylum", 4.0),
                Node::leaf("Bacteroidetes", "phylum", 6.0),
            ],
        ))
    }

    #[test]
    fn test_valid_tree_passes() {
        assert!(check_structure(&valid_tree()).is_ok());
        assert!(check_structure(&Tree::default()).is_ok());
    }

    #[test]
    fn test_duplicate_name_at_different_positions() {
        let tree = Tree::new(vec![
            Node::with_children("a", "superkingdom", 1.0, vec![Node::leaf("x", "phylum", 1.0)]),
            Node::with_children("b", "superkingdom", 1.0, vec![Node::leaf("x", "phylum", 1.0)]),
        ]);

        match check_structure(&tree).unwrap_err() {
            TaxTreeError::DuplicateName { name, scope } => {
                assert_eq!(name, "x");
                assert_eq!(scope, NameScope::Tree);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_name_fails() {
        let tree = Tree::from(Node::leaf("", "species", 1.0));
        assert!(matches!(
            check_structure(&tree),
            Err(TaxTreeError::Structural {
                violation: Violation::EmptyName,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_count_fails() {
        let tree = Tree::from(Node::with_children(
            "Bacteria",
            "superkingdom",
            1.0,
            vec![Node::leaf("Firmicutes", "phylum", -2.0)],
        ));
        match check_structure(&tree).unwrap_err() {
            TaxTreeError::Structural { node, violation } => {
                assert_eq!(violation, Violation::NegativeCount);
                assert!(node.contains("Firmicutes"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nan_count_fails() {
        let tree = Tree::from(Node::leaf("x", "species", f64::NAN));
        assert!(check_structure(&tree).is_err());
    }

    #[test]
    fn test_first_failure_is_reported() {
        // empty name comes before the duplicate in pre-order
        let tree = Tree::new(vec![
            Node::leaf("", "superkingdom", 1.0),
            Node::leaf("dup", "superkingdom", 1.0),
            Node::leaf("dup", "superkingdom", 1.0),
        ]);
        assert!(matches!(
            check_structure(&tree),
            Err(TaxTreeError::Structural {
                violation: Violation::EmptyName,
                ..
            })
        ));
    }

    #[test]
    fn test_check_ranks() {
        let ranked = Node::leaf("x", "species", 1.0);
        let unranked = Node::unranked("y", 1.0);
        assert!(check_ranks(&[&ranked]).is_ok());

        match check_ranks(&[&ranked, &unranked]).unwrap_err() {
            TaxTreeError::Structural { node, violation } => {
                assert_eq!(violation, Violation::MissingRank);
                assert_eq!(node, "'y'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
