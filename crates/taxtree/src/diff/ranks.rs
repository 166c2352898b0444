//! Ordered vocabulary of taxonomic ranks.

use crate::error::{Result, TaxTreeError};

/// Standard ranks, coarsest first.
pub const DEFAULT_RANKS: [&str; 9] = [
    "superkingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "species",
    "strain",
    "genome",
];

/// Ordered list of rank names, coarsest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankVocabulary {
    ranks: Vec<String>,
}

impl RankVocabulary {
    /// Create a vocabulary from rank names ordered coarse to fine.
    pub fn new<I, S>(ranks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ranks: ranks.into_iter().map(Into::into).collect(),
        }
    }

    /// Rank names, coarsest first.
    pub fn ranks(&self) -> &[String] {
        &self.ranks
    }

    pub fn contains(&self, rank: &str) -> bool {
        self.position(rank).is_some()
    }

    /// Index of a rank, 0 being the coarsest.
    pub fn position(&self, rank: &str) -> Option<usize> {
        self.ranks.iter().position(|r| r == rank)
    }

    /// The finest rank, if any.
    pub fn finest(&self) -> Option<&str> {
        self.ranks.last().map(String::as_str)
    }

    /// Index of a rank, or [`TaxTreeError::MissingRank`] if unknown.
    pub fn require(&self, rank: &str) -> Result<usize> {
        self.position(rank).ok_or_else(|| TaxTreeError::MissingRank {
            rank: rank.to_string(),
        })
    }

    /// Ranks from `lowest` up to the coarsest, finest first.
    ///
    /// With no `lowest` rank the walk starts at the finest rank.
    pub fn walk_up_from(&self, lowest: Option<&str>) -> Result<Vec<&str>> {
        let Some(lowest) = lowest.or_else(|| self.finest()) else {
            return Ok(Vec::new());
        };
        let start = self.require(lowest)?;
        Ok(self.ranks[..=start].iter().rev().map(String::as_str).collect())
    }
}

impl Default for RankVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_RANKS)
    }
}
