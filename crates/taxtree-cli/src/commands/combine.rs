//! Combine command - merge several trees into one union tree.

use std::path::PathBuf;

use colored::Colorize;
use taxtree::combine_trees;

use super::load_tree;
use crate::cli::AggregateChoice;

pub fn run(
    trees: Vec<PathBuf>,
    output: PathBuf,
    aggregate: AggregateChoice,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut loaded = Vec::with_capacity(trees.len());
    for path in &trees {
        let tree = load_tree(path)?;
        println!(
            "loaded {} nodes from '{}'",
            tree.node_count().to_string().white().bold(),
            path.display()
        );
        loaded.push(tree);
    }

    let combined = combine_trees(&loaded, aggregate.into())?;
    tracing::debug!(aggregation = %aggregate, "counts aggregated");

    println!(
        "loaded {} distinct names across {} nodes in {} trees.",
        combined.distinct_names.to_string().cyan(),
        combined.input_nodes,
        combined.input_trees
    );

    combined.tree.save(&output)?;
    println!(
        "{} {} nodes to '{}'",
        "saved".green().bold(),
        combined.node_count(),
        output.display()
    );

    Ok(())
}
