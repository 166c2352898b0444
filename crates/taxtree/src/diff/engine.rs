//! Rank-by-rank comparison of two trees.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{NameScope, Result, TaxTreeError};
use crate::tree::{Node, NodeName, Tree, collect_subtree};
use crate::validation::{check_ranks, check_structure};

use super::metric::{DiffMetric, fraction, fraction_delta};
use super::ranks::RankVocabulary;

/// Name of the top-level bucket for unclassified items.
pub const UNCLASSIFIED: &str = "unclassified";

/// Options for [`diff_at_ranks`].
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Rows must score strictly above this to be reported.
    pub tolerance: f64,
    /// Finest rank to compare (all ranks up to the coarsest are included).
    pub lowest_rank: Option<String>,
    /// Compare only this rank.
    pub rank_filter: Option<String>,
    /// Scoring metric.
    pub metric: DiffMetric,
    /// Leave a root named `unclassified`, with its whole subtree, out of the
    /// comparison and the totals.
    pub exclude_unclassified: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        let metric = DiffMetric::default();
        Self {
            tolerance: metric.default_tolerance(),
            lowest_rank: None,
            rank_filter: None,
            metric,
            exclude_unclassified: false,
        }
    }
}

impl DiffOptions {
    /// Create options with the default metric and its default tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given metric and its default tolerance.
    pub fn with_metric(mut self, metric: DiffMetric) -> Self {
        self.metric = metric;
        self.tolerance = metric.default_tolerance();
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_lowest_rank(mut self, rank: impl Into<String>) -> Self {
        self.lowest_rank = Some(rank.into());
        self
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank_filter = Some(rank.into());
        self
    }

    pub fn excluding_unclassified(mut self) -> Self {
        self.exclude_unclassified = true;
        self
    }
}

/// Comparison of one name at one rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffRow {
    pub rank: String,
    pub name: NodeName,
    /// Raw count in the first tree (0 if absent).
    pub count1: f64,
    /// Raw count in the second tree (0 if absent).
    pub count2: f64,
    /// Fraction of the first tree's total.
    pub f1: f64,
    /// Fraction of the second tree's total.
    pub f2: f64,
    /// Signed fraction difference, `f1 - f2`.
    pub delta: f64,
    /// Metric score used for ordering and the tolerance filter.
    pub score: f64,
}

/// All rows of a rank comparison, ordered rank by rank.
#[derive(Debug, Clone, Serialize)]
pub struct RankDiffReport {
    pub metric: DiffMetric,
    pub tolerance: f64,
    /// Whole-sample total of the first tree.
    pub total1: f64,
    /// Whole-sample total of the second tree.
    pub total2: f64,
    /// Ranks compared, in report order.
    pub ranks: Vec<String>,
    /// Every computed row, including those within tolerance.
    pub rows: Vec<DiffRow>,
}

impl RankDiffReport {
    /// Whether a row scores above the tolerance.
    pub fn is_reported(&self, row: &DiffRow) -> bool {
        row.score > self.tolerance
    }

    /// Rows scoring above the tolerance, in report order.
    pub fn reported(&self) -> impl Iterator<Item = &DiffRow> {
        self.rows.iter().filter(move |row| self.is_reported(row))
    }

    /// All rows computed for one rank.
    pub fn rows_at<'a>(&'a self, rank: &'a str) -> impl Iterator<Item = &'a DiffRow> {
        self.rows.iter().filter(move |row| row.rank == rank)
    }
}

/// Compare two trees rank by rank.
///
/// Fractions are taken against each tree's root-level total. Ranks are
/// visited from `options.lowest_rank` (or the finest rank) up to the
/// coarsest, optionally narrowed to `options.rank_filter`. Within a rank,
/// every name found at that rank in either tree gets one row; its
/// counterpart in the other tree is looked up by name, and a missing
/// counterpart counts as zero. Rows are sorted by descending score, ties
/// keeping encounter order (first tree's nodes, then the second's).
///
/// Rows within tolerance are kept in [`RankDiffReport::rows`]; use
/// [`RankDiffReport::reported`] for the filtered view.
///
/// # Errors
///
/// - [`TaxTreeError::MissingRank`] if a requested rank is not in `ranks`,
///   before any other work;
/// - structural errors if either tree is invalid or a node has no rank;
/// - [`TaxTreeError::DuplicateName`] if a rank holds a name twice.
pub fn diff_at_ranks(
    tree1: &Tree,
    tree2: &Tree,
    ranks: &RankVocabulary,
    options: &DiffOptions,
) -> Result<RankDiffReport> {
    let walk = ranks.walk_up_from(options.lowest_rank.as_deref())?;
    if let Some(rank) = &options.rank_filter {
        ranks.require(rank)?;
    }

    let side1 = Side::new(tree1, options.exclude_unclassified)?;
    let side2 = Side::new(tree2, options.exclude_unclassified)?;

    let mut compared = Vec::new();
    let mut rows = Vec::new();

    for rank in walk {
        if options.rank_filter.as_deref().is_some_and(|r| r != rank) {
            continue;
        }

        let bucket1 = side1.bucket(rank)?;
        let bucket2 = side2.bucket(rank)?;

        let mut seen = HashSet::new();
        let mut rank_rows = Vec::new();
        for node in bucket1.values().chain(bucket2.values()) {
            if !seen.insert(node.name.as_str()) {
                continue;
            }
            rank_rows.push(side1.compare(&side2, rank, &node.name, options.metric));
        }

        rank_rows.sort_by(|a, b| b.score.total_cmp(&a.score));
        rows.extend(rank_rows);
        compared.push(rank.to_string());
    }

    Ok(RankDiffReport {
        metric: options.metric,
        tolerance: options.tolerance,
        total1: side1.total,
        total2: side2.total,
        ranks: compared,
        rows,
    })
}

/// One tree prepared for comparison.
struct Side<'a> {
    nodes: Vec<&'a Node>,
    by_name: HashMap<&'a str, &'a Node>,
    total: f64,
}

impl<'a> Side<'a> {
    fn new(tree: &'a Tree, exclude_unclassified: bool) -> Result<Self> {
        check_structure(tree)?;

        let roots: Vec<&Node> = tree
            .roots()
            .iter()
            .filter(|n| !(exclude_unclassified && n.name.as_str() == UNCLASSIFIED))
            .collect();

        let mut nodes = Vec::with_capacity(tree.node_count());
        for &root in &roots {
            nodes.extend(collect_subtree(root)?);
        }
        check_ranks(&nodes)?;

        let total = roots.iter().map(|n| n.count).sum();

        let by_name = nodes.iter().map(|n| (n.name.as_str(), *n)).collect();

        Ok(Self {
            nodes,
            by_name,
            total,
        })
    }

    /// Nodes at `rank`, keyed by name, in pre-order.
    fn bucket(&self, rank: &str) -> Result<IndexMap<&'a str, &'a Node>> {
        let mut bucket = IndexMap::new();
        for node in self.nodes.iter().filter(|n| n.rank() == Some(rank)) {
            if bucket.insert(node.name.as_str(), *node).is_some() {
                return Err(TaxTreeError::DuplicateName {
                    name: node.name.to_string(),
                    scope: NameScope::Rank(rank.to_string()),
                });
            }
        }
        Ok(bucket)
    }

    fn count_of(&self, name: &str) -> f64 {
        self.by_name.get(name).map_or(0.0, |n| n.count)
    }

    fn compare(
        &self,
        other: &Side<'_>,
        rank: &str,
        name: &NodeName,
        metric: DiffMetric,
    ) -> DiffRow {
        let count1 = self.count_of(name.as_str());
        let count2 = other.count_of(name.as_str());

        DiffRow {
            rank: rank.to_string(),
            name: name.clone(),
            count1,
            count2,
            f1: fraction(count1, self.total),
            f2: fraction(count2, other.total),
            delta: fraction_delta(count1, self.total, count2, other.total),
            score: metric.score(count1, self.total, count2, other.total),
        }
    }
}
