use crate::commands::{run_explain, run_simulate, ExplainArgs, SimulateArgs};
use clap::{Parser, Subcommand};
use loot_arbiter::config::AppConfig;
use loot_arbiter::error::AppError;
use loot_arbiter::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "loot-arbiter",
    about = "Preview and simulate loot-roll decisions against a recorded scenario",
    version
)]
struct Cli {
    /// Engine settings file (overrides LOOT_ARBITER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how a single item would be decided and why
    Explain(ExplainArgs),
    /// Roll through the scenario's loot window with pacing and lockout handling
    Simulate(SimulateArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.config {
        config.engine_config_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;
    let engine_config = config.engine_config()?;

    match cli.command {
        Command::Explain(args) => run_explain(args, &engine_config),
        Command::Simulate(args) => run_simulate(args, &engine_config),
    }
}
