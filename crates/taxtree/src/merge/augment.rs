//! Name-keyed union of several trees.

use std::collections::HashMap;

use crate::error::Result;
use crate::tree::{Node, NodeName, Tree, copy_tree};
use crate::validation::check_structure;

/// Merge a base tree and additional trees into one union tree.
///
/// The result starts as a deep copy of `base`. Each additional tree is then
/// folded in, in order, matching nodes by name:
///
/// - a name already in the merged tree keeps its position and count; only
///   its descendants are folded in below it;
/// - a novel name is copied (rank, count and attributes included) under the
///   merged node matching its original parent, or appended as a new root.
///
/// The first tree to place a name decides where it lives, so every name
/// appears exactly once in the output. Children keep base order, followed by
/// novel children in the order they were encountered. Counts are not
/// combined here; see [`aggregate_counts`](super::aggregate_counts).
///
/// No input is modified.
///
/// # Errors
///
/// Every input must pass [`check_structure`]; the first failure is returned
/// before any merging starts.
pub fn augment_tree(base: &Tree, others: &[Tree]) -> Result<Tree> {
    check_structure(base)?;
    for other in others {
        check_structure(other)?;
    }

    let mut merged = copy_tree(base);
    let mut placements = placements(&merged);

    for other in others {
        for root in other.roots() {
            fold(&mut merged, &mut placements, &[], root);
        }
    }

    Ok(merged)
}

/// Child-index path from the roots to each named node of `tree`.
fn placements(tree: &Tree) -> HashMap<NodeName, Vec<usize>> {
    let mut paths = HashMap::with_capacity(tree.node_count());
    let mut stack: Vec<(&Node, Vec<usize>)> = tree
        .roots()
        .iter()
        .enumerate()
        .map(|(i, n)| (n, vec![i]))
        .collect();

    while let Some((node, path)) = stack.pop() {
        for (i, child) in node.children.iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(i);
            stack.push((child, child_path));
        }
        paths.insert(node.name.clone(), path);
    }

    paths
}

/// Fold `node` and its descendants into `merged` below the node at `parent`.
///
/// An empty `parent` path means the roots. Paths stay valid while folding
/// because nodes are only ever appended.
fn fold(
    merged: &mut Tree,
    placements: &mut HashMap<NodeName, Vec<usize>>,
    parent: &[usize],
    node: &Node,
) {
    let path = match placements.get(&node.name) {
        Some(existing) => existing.clone(),
        None => {
            let siblings = children_at_mut(merged.roots_mut(), parent);
            siblings.push(node.detached());

            let mut path = parent.to_vec();
            path.push(siblings.len() - 1);
            placements.insert(node.name.clone(), path.clone());
            path
        }
    };

    for child in &node.children {
        fold(merged, placements, &path, child);
    }
}

fn children_at_mut<'a>(roots: &'a mut Vec<Node>, path: &[usize]) -> &'a mut Vec<Node> {
    let mut siblings = roots;
    for &i in path {
        siblings = &mut siblings[i].children;
    }
    siblings
}
