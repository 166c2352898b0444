//! Tree model and traversal.
//!
//! A [`Tree`] is an owned forest of [`Node`]s. Children are owned by their
//! parent, so a node can never be reachable through two parents and every
//! copy is deep.

mod collect;
mod forest;
mod node;

pub use collect::collect_all_nodes;
pub(crate) use collect::{collect_subtree, unnamed_location};
pub use forest::{Tree, copy_tree};
pub use node::{Node, NodeName};
