//! Leaves command - compare the leaf names of two trees.

use std::path::PathBuf;

use colored::Colorize;
use taxtree::compare_leaves;

use super::load_tree;

pub fn run(
    tree1: PathBuf,
    tree2: PathBuf,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let first = load_tree(&tree1)?;
    let second = load_tree(&tree2)?;

    let comparison = compare_leaves(&first, &second)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!("loaded {} nodes from '{}'", first.node_count(), tree1.display());
    println!("loaded {} nodes from '{}'", second.node_count(), tree2.display());
    println!();
    println!(
        "{} / {} leaf nodes.",
        comparison.leaves_first.to_string().white().bold(),
        comparison.leaves_second.to_string().white().bold()
    );
    println!(
        "only 1: {}; only 2: {}; both: {}",
        comparison.only_first.len().to_string().yellow(),
        comparison.only_second.len().to_string().yellow(),
        comparison.shared.len().to_string().green()
    );

    Ok(())
}
