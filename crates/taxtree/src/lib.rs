//! taxtree: merge and compare taxonomic classification trees.
//!
//! Each tree comes from one classifier run: a forest of named taxonomic
//! units carrying observed counts. taxtree combines several runs into one
//! union tree and compares two runs rank by rank.
//!
//! # Core Principles
//!
//! - **Name-keyed identity**: a node is identified by its name, unique
//!   across its tree
//! - **Non-destructive**: inputs are never modified; merging builds a new tree
//! - **Fail fast**: invalid structure is an error, never silently repaired
//!
//! # Example
//!
//! ```no_run
//! use taxtree::{DiffOptions, RankVocabulary, Tree, diff_at_ranks};
//!
//! let first = Tree::load("run1.json").unwrap();
//! let second = Tree::load("run2.json").unwrap();
//!
//! let options = DiffOptions::new().with_lowest_rank("species");
//! let report = diff_at_ranks(&first, &second, &RankVocabulary::default(), &options).unwrap();
//!
//! for row in report.reported() {
//!     println!("{} {} {:.3}", row.rank, row.name, row.score);
//! }
//! ```

pub mod diff;
pub mod error;
pub mod merge;
pub mod tree;
pub mod validation;

mod persistence;

pub use diff::{
    DiffMetric, DiffOptions, DiffRow, LeafComparison, RankDiffReport, RankVocabulary,
    compare_leaves, diff_at_ranks,
};
pub use error::{NameScope, Result, TaxTreeError, Violation};
pub use merge::{
    CombinedTree, CountAggregation, NameIndex, aggregate_counts, augment_tree, combine_trees,
};
pub use tree::{Node, NodeName, Tree, collect_all_nodes, copy_tree};
pub use validation::{check_structure, trees_are_equal};
