//! taxtree CLI - merge and compare taxonomic classification trees.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Combine {
            trees,
            output,
            aggregate,
        } => commands::combine::run(trees, output, aggregate),

        Commands::Compare(args) => commands::compare::run(args),

        Commands::Leaves { tree1, tree2, json } => commands::leaves::run(tree1, tree2, json),

        Commands::Check { trees, json } => commands::check::run(trees, json),
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

/// Log to stderr; `-v` raises the level, `RUST_LOG` overrides it.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!(%level, "logging initialised");
}
