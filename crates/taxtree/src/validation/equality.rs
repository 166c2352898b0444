//! Structural equality between two collected node sequences.

use std::collections::{HashMap, HashSet};

use crate::tree::Node;

/// Whether two node sequences describe the same structure.
///
/// Both sides must hold the same set of names, and for every name the rank,
/// the count and the set of child names must match. Node identity and child
/// order are not compared; extra document attributes are ignored.
///
/// Typically called on the output of
/// [`collect_all_nodes`](crate::tree::collect_all_nodes), e.g. to show that
/// merging left its inputs untouched.
pub fn trees_are_equal(nodes_a: &[&Node], nodes_b: &[&Node]) -> bool {
    if nodes_a.len() != nodes_b.len() {
        return false;
    }

    let index_a = index_by_name(nodes_a);
    let index_b = index_by_name(nodes_b);
    if index_a.len() != nodes_a.len() || index_b.len() != nodes_b.len() {
        // repeated names on either side; sequences are not trees
        return false;
    }

    index_a.iter().all(|(name, a)| match index_b.get(name) {
        Some(b) => nodes_match(a, b),
        None => false,
    })
}

fn index_by_name<'a>(nodes: &[&'a Node]) -> HashMap<&'a str, &'a Node> {
    nodes.iter().map(|n| (n.name.as_str(), *n)).collect()
}

fn nodes_match(a: &Node, b: &Node) -> bool {
    a.rank == b.rank && a.count == b.count && child_names(a) == child_names(b)
}

fn child_names(node: &Node) -> HashSet<&str> {
    node.children.iter().map(|c| c.name.as_str()).collect()
}
