//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use taxtree::{CountAggregation, DiffMetric};

/// taxtree: merge and compare taxonomic classification trees
#[derive(Parser)]
#[command(name = "taxtree")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge several trees into one union tree
    Combine {
        /// Tree files (JSON); the first one is the base tree
        #[arg(value_name = "TREE", required = true)]
        trees: Vec<PathBuf>,

        /// Output path for the merged tree
        #[arg(short, long)]
        output: PathBuf,

        /// How counts of a name seen in several trees are combined
        #[arg(short, long, default_value = "mean")]
        aggregate: AggregateChoice,
    },

    /// Compare two trees rank by rank
    Compare(CompareArgs),

    /// Compare the leaf names of two trees
    Leaves {
        /// First tree file
        #[arg(value_name = "TREE1")]
        tree1: PathBuf,

        /// Second tree file
        #[arg(value_name = "TREE2")]
        tree2: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the structure of tree files
    Check {
        /// Tree files (JSON)
        #[arg(value_name = "TREE", required = true)]
        trees: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First tree file
    #[arg(value_name = "TREE1")]
    pub tree1: PathBuf,

    /// Second tree file
    #[arg(value_name = "TREE2")]
    pub tree2: PathBuf,

    /// Difference metric
    #[arg(short, long, default_value = "fraction")]
    pub metric: MetricChoice,

    /// Report only rows scoring above this (default: 0.01 for fraction, 0 for relative-loss)
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Finest rank to compare; all coarser ranks are included
    #[arg(long)]
    pub lowest_rank: Option<String>,

    /// Compare only this rank
    #[arg(long)]
    pub rank: Option<String>,

    /// Leave the 'unclassified' node out of the comparison
    #[arg(long)]
    pub remove_unclassified: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include rows within tolerance (csv and json only)
    #[arg(long)]
    pub all: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MetricChoice {
    /// Absolute difference of fractions of the total
    #[default]
    Fraction,
    /// Share of the first tree's count missing from the second
    RelativeLoss,
}

impl std::str::FromStr for MetricChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fraction" | "diff" => Ok(MetricChoice::Fraction),
            "relative-loss" | "loss" | "counts" => Ok(MetricChoice::RelativeLoss),
            _ => Err(format!(
                "Unknown metric: {}. Use fraction or relative-loss.",
                s
            )),
        }
    }
}

impl std::fmt::Display for MetricChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricChoice::Fraction => write!(f, "fraction"),
            MetricChoice::RelativeLoss => write!(f, "relative-loss"),
        }
    }
}

impl From<MetricChoice> for DiffMetric {
    fn from(choice: MetricChoice) -> Self {
        match choice {
            MetricChoice::Fraction => DiffMetric::AbsoluteFraction,
            MetricChoice::RelativeLoss => DiffMetric::RelativeLoss,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AggregateChoice {
    #[default]
    Mean,
    Sum,
    Max,
    /// Keep the count of the first placement
    Keep,
}

impl std::str::FromStr for AggregateChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" | "average" => Ok(AggregateChoice::Mean),
            "sum" => Ok(AggregateChoice::Sum),
            "max" => Ok(AggregateChoice::Max),
            "keep" | "first" => Ok(AggregateChoice::Keep),
            _ => Err(format!(
                "Unknown aggregation: {}. Use mean, sum, max, or keep.",
                s
            )),
        }
    }
}

impl std::fmt::Display for AggregateChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateChoice::Mean => write!(f, "mean"),
            AggregateChoice::Sum => write!(f, "sum"),
            AggregateChoice::Max => write!(f, "max"),
            AggregateChoice::Keep => write!(f, "keep"),
        }
    }
}

impl From<AggregateChoice> for CountAggregation {
    fn from(choice: AggregateChoice) -> Self {
        match choice {
            AggregateChoice::Mean => CountAggregation::Mean,
            AggregateChoice::Sum => CountAggregation::Sum,
            AggregateChoice::Max => CountAggregation::Max,
            AggregateChoice::Keep => CountAggregation::Keep,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(ReportFormat::Table),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table, csv, or json.", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "taxtree",
            "-vv",
            "compare",
            "a.json",
            "b.json",
            "--metric",
            "relative-loss",
            "--lowest-rank",
            "genus",
            "--remove-unclassified",
            "-f",
            "csv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.metric, MetricChoice::RelativeLoss);
                assert_eq!(args.lowest_rank.as_deref(), Some("genus"));
                assert_eq!(args.format, ReportFormat::Csv);
                assert!(args.remove_unclassified);
                assert!(args.tolerance.is_none());
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_combine_requires_output() {
        assert!(Cli::try_parse_from(["taxtree", "combine", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["taxtree", "combine", "-o", "out.json"]).is_err());
    }

    #[test]
    fn test_choices_from_str() {
        assert_eq!("Loss".parse::<MetricChoice>(), Ok(MetricChoice::RelativeLoss));
        assert_eq!("relative_loss".parse::<MetricChoice>(), Ok(MetricChoice::RelativeLoss));
        assert_eq!("SUM".parse::<AggregateChoice>(), Ok(AggregateChoice::Sum));
        assert!("median".parse::<AggregateChoice>().is_err());
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!(ReportFormat::Table.to_string(), "table");
    }

    #[test]
    fn test_choices_map_to_library() {
        assert_eq!(DiffMetric::from(MetricChoice::Fraction), DiffMetric::AbsoluteFraction);
        assert_eq!(CountAggregation::from(AggregateChoice::Keep), CountAggregation::Keep);
    }
}
