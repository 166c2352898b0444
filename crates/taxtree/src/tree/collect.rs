//! Flattening a tree into its nodes.

use crate::error::{Result, TaxTreeError, Violation};

use super::forest::Tree;
use super::node::{Node, NodeName};

/// Collect every node reachable from the roots in pre-order.
///
/// Each node comes before its children, children are visited left to right,
/// and roots are included. The output length equals [`Tree::node_count`] and
/// the order is stable across calls on the same tree.
///
/// # Errors
///
/// Returns a structural error as soon as a node with an empty name is reached.
///
/// # Example
///
/// ```
/// use taxtree::{Node, Tree, collect_all_nodes};
///
/// let tree = Tree::from(Node::with_children(
///     "Bacteria",
///     "superkingdom",
///     5.0,
///     vec![Node::leaf("Firmicutes", "phylum", 5.0)],
/// ));
/// let names: Vec<_> = collect_all_nodes(&tree)
///     .unwrap()
///     .iter()
///     .map(|n| n.name.as_str())
///     .collect();
/// assert_eq!(names, ["Bacteria", "Firmicutes"]);
/// ```
pub fn collect_all_nodes(tree: &Tree) -> Result<Vec<&Node>> {
    let stack = tree.roots().iter().rev().map(|n| (n, None)).collect();
    collect_preorder(stack, tree.node_count())
}

/// Collect `root` and its descendants in pre-order.
pub(crate) fn collect_subtree(root: &Node) -> Result<Vec<&Node>> {
    collect_preorder(vec![(root, None)], root.subtree_size())
}

fn collect_preorder<'a>(
    mut stack: Vec<(&'a Node, Option<&'a NodeName>)>,
    capacity: usize,
) -> Result<Vec<&'a Node>> {
    let mut nodes = Vec::with_capacity(capacity);

    while let Some((node, parent)) = stack.pop() {
        if node.name.is_empty() {
            return Err(TaxTreeError::structural(
                unnamed_location(parent),
                Violation::EmptyName,
            ));
        }
        nodes.push(node);
        stack.extend(node.children.iter().rev().map(|c| (c, Some(&node.name))));
    }

    Ok(nodes)
}

/// Describe where an unnamed node sits, for error messages.
pub(crate) fn unnamed_location(parent: Option<&NodeName>) -> String {
    match parent {
        Some(p) => format!("unnamed child of '{}'", p),
        None => "unnamed root node".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::new(vec![
            Node::with_children(
                "Bacteria",
                "superkingdom",
                80.0,
                vec![
                    Node::with_children(
                        "Proteobacteria",
                        "phylum",
                        50.0,
                        vec![Node::leaf("Gammaproteobacteria", "class", 50.0)],
                    ),
                    Node::leaf("Firmicutes", "phylum", 30.0),
                ],
            ),
            Node::leaf("Archaea", "superkingdom", 20.0),
        ])
    }

    fn names(nodes: &[&Node]) -> Vec<String> {
        nodes.iter().map(|n| n.name.to_string()).collect()
    }

    #[test]
    fn test_preorder_traversal() {
        let tree = sample();
        let nodes = collect_all_nodes(&tree).unwrap();
        assert_eq!(
            names(&nodes),
            vec![
                "Bacteria",
                "Proteobacteria",
                "Gammaproteobacteria",
                "Firmicutes",
                "Archaea"
            ]
        );
        assert_eq!(nodes.len(), tree.node_count());
    }

    #[test]
    fn test_collection_is_idempotent() {
        let tree = sample();
        let first = collect_all_nodes(&tree).unwrap();
        let second = collect_all_nodes(&tree).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_tree_collects_nothing() {
        assert!(collect_all_nodes(&Tree::default()).unwrap().is_empty());
    }

    #[test]
    fn test_subtree_collection() {
        let tree = sample();
        let nodes = collect_subtree(&tree.roots()[0]).unwrap();
        assert_eq!(
            names(&nodes),
            vec![
                "Bacteria",
                "Proteobacteria",
                "Gammaproteobacteria",
                "Firmicutes"
            ]
        );
    }

    #[test]
    fn test_empty_name_fails() {
        let tree = Tree::from(Node::with_children(
            "Bacteria",
            "superkingdom",
            1.0,
            vec![Node::leaf("", "phylum", 1.0)],
        ));
        let err = collect_all_nodes(&tree).unwrap_err();
        match err {
            TaxTreeError::Structural { node, violation } => {
                assert_eq!(violation, Violation::EmptyName);
                assert!(node.contains("Bacteria"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_root_name_fails() {
        let tree = Tree::from(Node::leaf("", "superkingdom", 1.0));
        assert!(matches!(
            collect_all_nodes(&tree),
            Err(TaxTreeError::Structural {
                violation: Violation::EmptyName,
                ..
            })
        ));
    }
}
