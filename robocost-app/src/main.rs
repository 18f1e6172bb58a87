use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::ScenarioBook;
use crate::workflow::RunOptions;

mod config;
mod interactive;
mod ledger;
mod plotting;
mod report;
mod workflow;

/// Cost and ROI calculators for robotic lawnmowers.
#[derive(Debug, Parser)]
#[command(name = "robocost", version, about)]
struct Cli {
    /// Print results as JSON instead of text reports.
    #[arg(long, global = true)]
    json: bool,

    /// Directory for the ledger and charts. Defaults to ./runs/<kind>_<timestamp>.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Skip chart generation.
    #[arg(long, global = true)]
    no_plots: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare traditional lawn care with a robot for each scenario.
    Roi {
        /// A scenario YAML file, or a directory of them.
        path: PathBuf,
    },
    /// Estimate yearly robot maintenance for each scenario.
    Diagnostic { path: PathBuf },
    /// Answer the diagnostic questions interactively.
    Quiz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    println!("--- Robocost ---");

    match &cli.command {
        Command::Roi { path } => {
            let book = ScenarioBook::load_roi(path)?;
            let options = prepare_run(&cli, "roi", path)?;
            let summary = workflow::run_roi_scenarios(&book, &options)?;
            println!(
                "\n{} scenario(s) calculated, {} rejected. Results are in '{}'",
                summary.calculated,
                summary.rejected,
                options.output_dir.display()
            );
        }
        Command::Diagnostic { path } => {
            let book = ScenarioBook::load_diagnostic(path)?;
            let options = prepare_run(&cli, "diagnostic", path)?;
            let summary = workflow::run_diagnostic_scenarios(&book, &options)?;
            println!(
                "\n{} scenario(s) calculated, {} rejected. Results are in '{}'",
                summary.calculated,
                summary.rejected,
                options.output_dir.display()
            );
        }
        Command::Quiz => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let result = interactive::run_quiz(stdin.lock(), &mut stdout)?;
            if cli.json {
                if let Some(result) = result {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
            }
        }
    }

    Ok(())
}

/// Creates the output directory and keeps a copy of the scenario file in it
/// for traceability.
fn prepare_run(cli: &Cli, kind: &str, source: &Path) -> Result<RunOptions> {
    let output_dir = cli.out.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "./runs/{}_{}",
            kind,
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        ))
    });
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    if source.is_file() {
        if let Some(file_name) = source.file_name() {
            fs::copy(source, output_dir.join(file_name))
                .with_context(|| format!("Failed to copy {:?} into the run directory", source))?;
        }
    }

    Ok(RunOptions {
        output_dir,
        json: cli.json,
        plots: !cli.no_plots && kind == "roi",
    })
}
