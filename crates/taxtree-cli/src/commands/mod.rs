//! CLI command implementations.

pub mod check;
pub mod combine;
pub mod compare;
pub mod leaves;

use std::path::Path;

use taxtree::Tree;

/// Load a tree file, logging its size.
pub(crate) fn load_tree(path: &Path) -> Result<Tree, Box<dyn std::error::Error>> {
    let tree = Tree::load(path)?;
    tracing::info!(
        path = %path.display(),
        nodes = tree.node_count(),
        "loaded tree"
    );
    Ok(tree)
}
