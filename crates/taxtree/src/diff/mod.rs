//! Comparing classification trees.
//!
//! [`diff_at_ranks`] compares relative abundances rank by rank, scoring each
//! name with a [`DiffMetric`]. [`compare_leaves`] compares leaf name sets.

mod engine;
mod export;
mod leaves;
mod metric;
mod ranks;

pub use engine::{DiffOptions, DiffRow, RankDiffReport, UNCLASSIFIED, diff_at_ranks};
pub use leaves::{LeafComparison, compare_leaves};
pub use metric::DiffMetric;
pub use ranks::{DEFAULT_RANKS, RankVocabulary};
