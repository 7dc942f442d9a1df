use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod analysis;
mod config;
mod error;
mod git;
mod output;

use crate::config::Config;
use analysis::{Aggregator, ContributionStats};
use error::StatsError;
use git::GitHistory;
use output::{Reporter, TableSpec};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./repostats.toml when present)
    #[arg(long, global = true, env = "REPOSTATS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show Git repo stats
    ///
    /// Analyze a Git repository and show useful insights like contributors and commits.
    Stats {
        /// Path to local git repo
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the report
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = Reporter::new(stdout.lock(), false).failure(format_args!("{e:#}"));
            return ExitCode::FAILURE;
        }
    };

    let color = config.output.color_output && stdout.is_terminal();
    colored::control::set_override(color);
    let mut reporter = Reporter::new(stdout.lock(), color);

    match run(cli.command, &config, &mut reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            trace_failure(&e);
            let _ = reporter.failure(format_args!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(command: Commands, config: &Config, reporter: &mut Reporter<W>) -> Result<()> {
    match command {
        Commands::Stats { path } => {
            let path = path.ok_or(StatsError::MissingInput)?;
            stats(&path, config, reporter)
        }
    }
}

fn stats<W: Write>(path: &Path, config: &Config, reporter: &mut Reporter<W>) -> Result<()> {
    let history = GitHistory::open(path)?;
    let aggregator = Aggregator::new(&history, config.analysis.show_progress);
    let files_spec = TableSpec::files(config.output.max_files);

    if config.analysis.single_pass {
        info!("Collecting contributors and file stats in one walk");
        let ContributionStats { authors, files } = aggregator.count_all()?;
        reporter.table(authors, &TableSpec::contributors())?;
        reporter.separator()?;
        reporter.table(files, &files_spec)?;
    } else {
        let authors = aggregator.count_authors()?;
        reporter.table(authors, &TableSpec::contributors())?;
        let files = aggregator.count_file_changes()?;
        reporter.separator()?;
        reporter.table(files, &files_spec)?;
    }

    Ok(())
}

fn trace_failure(e: &anyhow::Error) {
    match e.downcast_ref::<StatsError>() {
        Some(StatsError::RepositoryOpen { path, .. }) => {
            debug!("No repository could be opened at {}", path.display())
        }
        Some(StatsError::DiffComputation { commit, .. }) => {
            debug!("Diff against first parent failed for commit {}", commit)
        }
        _ => debug!("Command failed: {:?}", e),
    }
}
