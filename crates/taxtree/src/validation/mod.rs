//! Structural validation of classification trees.

mod equality;
mod structure;

pub use equality::trees_are_equal;
pub use structure::{check_ranks, check_structure};
