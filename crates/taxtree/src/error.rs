//! Error types for the taxtree library.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Structural invariant a node can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Node has an empty or absent name.
    EmptyName,
    /// Node count is negative or not a number.
    NegativeCount,
    /// Node has no rank where rank-based comparison needs one.
    MissingRank,
}

impl Violation {
    /// Get a human-readable description of the invariant.
    pub fn label(&self) -> &'static str {
        match self {
            Violation::EmptyName => "node name must not be empty",
            Violation::NegativeCount => "count must be a non-negative number",
            Violation::MissingRank => "node must carry a rank",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scope within which a name was expected to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameScope {
    /// The whole tree.
    Tree,
    /// The bucket of nodes at one rank.
    Rank(String),
}

impl fmt::Display for NameScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameScope::Tree => write!(f, "tree"),
            NameScope::Rank(rank) => write!(f, "rank '{}'", rank),
        }
    }
}

/// Main error type for taxtree operations.
#[derive(Debug, Error)]
pub enum TaxTreeError {
    /// A tree violates a required structural invariant.
    #[error("Structural error at {node}: {violation}")]
    Structural { node: String, violation: Violation },

    /// Two nodes share a name within a scope that must be unique.
    #[error("Duplicate name '{name}' within {scope}")]
    DuplicateName { name: String, scope: NameScope },

    /// A requested rank is not part of the rank vocabulary.
    #[error("Rank '{rank}' is not in the rank vocabulary")]
    MissingRank { rank: String },

    /// No trees supplied where at least one is required.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Error reading or writing a file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TaxTreeError {
    pub(crate) fn structural(node: impl Into<String>, violation: Violation) -> Self {
        TaxTreeError::Structural {
            node: node.into(),
            violation,
        }
    }
}

/// Result type alias for taxtree operations.
pub type Result<T> = std::result::Result<T, TaxTreeError>;
