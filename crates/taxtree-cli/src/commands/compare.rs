//! Compare command - rank-by-rank abundance differences between two trees.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use colored::Colorize;
use taxtree::{DiffMetric, DiffOptions, DiffRow, RankDiffReport, RankVocabulary, diff_at_ranks};

use super::load_tree;
use crate::cli::{CompareArgs, ReportFormat};

pub fn run(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(&args);

    let tree1 = load_tree(&args.tree1)?;
    let tree2 = load_tree(&args.tree2)?;

    let report = diff_at_ranks(&tree1, &tree2, &RankVocabulary::default(), &options)?;
    tracing::info!(
        metric = report.metric.label(),
        tolerance = report.tolerance,
        rows = report.rows.len(),
        reported = report.reported().count(),
        "comparison finished"
    );

    // colour only goes to the terminal, never into a report file
    let color = args.output.is_none();
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ReportFormat::Table => {
            writeln!(
                out,
                "loaded {} nodes from '{}'",
                tree1.node_count(),
                args.tree1.display()
            )?;
            writeln!(
                out,
                "loaded {} nodes from '{}'",
                tree2.node_count(),
                args.tree2.display()
            )?;
            if options.exclude_unclassified {
                writeln!(out, "removing 'unclassified' from both trees")?;
            }
            writeln!(out)?;
            render_table(&report, &mut out, color)?;
        }
        ReportFormat::Csv => report.write_csv(&mut out, !args.all)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &json_report(&report, args.all))?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    if let Some(path) = &args.output {
        eprintln!(
            "{} {} report to '{}'",
            "Wrote".green().bold(),
            args.format,
            path.display()
        );
    }

    Ok(())
}

fn build_options(args: &CompareArgs) -> DiffOptions {
    let mut options = DiffOptions::new().with_metric(args.metric.into());
    if let Some(tolerance) = args.tolerance {
        options = options.with_tolerance(tolerance);
    }
    if let Some(rank) = &args.lowest_rank {
        options = options.with_lowest_rank(rank.as_str());
    }
    if let Some(rank) = &args.rank {
        options = options.with_rank(rank.as_str());
    }
    if args.remove_unclassified {
        options = options.excluding_unclassified();
    }
    options
}

/// Render reported rows as a fixed-width table.
fn render_table<W: Write>(report: &RankDiffReport, out: &mut W, color: bool) -> io::Result<()> {
    let header = format!(
        "{:<15} {:<30}  {:>5}",
        "rank",
        "name",
        report.metric.label()
    );
    if color {
        writeln!(out, "{}", header.yellow().bold())?;
    } else {
        writeln!(out, "{}", header)?;
    }
    writeln!(
        out,
        "{:<15} {:<30}  {:>5}",
        "-".repeat(12),
        "-".repeat(12),
        "-".repeat(5)
    )?;

    for row in report.reported() {
        writeln!(out, "{}", format_row(report.metric, row, color))?;
    }
    Ok(())
}

/// One table line: the measure, then raw counts or fractions for both sides.
fn format_row(metric: DiffMetric, row: &DiffRow, color: bool) -> String {
    let prefix = format!("{:<15} {:<30}", row.rank, row.name);

    let measure = if metric.uses_raw_counts() {
        row.score
    } else {
        row.delta
    };
    let text = format!("{:>5.1}%", measure * 100.0);
    let measure = match (color, measure >= 0.0) {
        (false, _) => text,
        (true, true) => text.red().to_string(),
        (true, false) => text.green().to_string(),
    };

    if metric.uses_raw_counts() {
        format!(
            "{} {}    {:>8} / {:>8}",
            prefix, measure, row.count1, row.count2
        )
    } else {
        format!(
            "{} {}    {:>4.1}% / {:>4.1}%",
            prefix,
            measure,
            row.f1 * 100.0,
            row.f2 * 100.0
        )
    }
}

fn json_report(report: &RankDiffReport, all: bool) -> serde_json::Value {
    let rows: Vec<&DiffRow> = if all {
        report.rows.iter().collect()
    } else {
        report.reported().collect()
    };

    serde_json::json!({
        "metric": report.metric,
        "tolerance": report.tolerance,
        "total1": report.total1,
        "total2": report.total2,
        "ranks": report.ranks,
        "rows": rows,
    })
}
