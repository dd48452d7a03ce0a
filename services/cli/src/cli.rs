use crate::catalog::{run_check, run_dedup, run_supplement, CheckArgs};
use crate::recipes::{run_analyze, run_restructure, RestructureArgs};
use clap::{Parser, Subcommand};
use recipe_catalog::config::AppConfig;
use recipe_catalog::error::AppError;
use recipe_catalog::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "recipe-catalog",
    about = "Maintain the ingredient catalog and recipe tables stored as CSV files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report how the recipe master table and ingredient detail table relate
    Analyze,
    /// Collapse duplicate catalog rows into the clean catalog file
    Dedup,
    /// Check candidate ingredient names against the catalog
    Check(CheckArgs),
    /// List common ingredients that the catalog is still missing
    Supplement,
    /// Pivot recipe ingredients into one row per recipe plus a summary file
    Restructure(RestructureArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let files = config.data.files();
    debug!(data_dir = %config.data.data_dir.display(), "resolved data directory");

    match cli.command {
        Command::Analyze => run_analyze(&files),
        Command::Dedup => run_dedup(&files),
        Command::Check(args) => run_check(&files, args),
        Command::Supplement => run_supplement(&files),
        Command::Restructure(args) => run_restructure(&files, args),
    }
}
