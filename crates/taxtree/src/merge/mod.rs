//! Merging classification trees.
//!
//! [`augment_tree`] builds the union structure. Counts are combined in a
//! separate pass over the merged nodes ([`aggregate_counts`]), using a
//! [`NameIndex`] of every original occurrence. [`combine_trees`] runs both.

mod augment;
mod combine;
mod counts;

pub use augment::augment_tree;
pub use combine::{CombinedTree, combine_trees};
pub use counts::{CountAggregation, NameIndex, aggregate_counts};
