use crate::commands::{run_colors, run_export, run_import, run_score};
use crate::commands::{ColorsArgs, ExportArgs, ImportArgs, ScoreArgs};
use clap::{Parser, Subcommand};
use rubric_engine::config::AppConfig;
use rubric_engine::error::AppError;
use rubric_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "rubric",
    about = "Import rubric tables and score student assessments from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a Markdown or CSV rubric table and print the assembled rubric as JSON
    Import(ImportArgs),
    /// Print the level color gradient for a number of levels
    Colors(ColorsArgs),
    /// Score a student's level selections against a rubric JSON document
    Score(ScoreArgs),
    /// Render a rubric JSON document back into a Markdown or CSV table
    Export(ExportArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Import(args) => run_import(args, config.engine),
        Command::Colors(args) => run_colors(args),
        Command::Score(args) => run_score(args, config.engine),
        Command::Export(args) => run_export(args),
    }
}
