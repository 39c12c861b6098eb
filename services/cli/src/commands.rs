use crate::infra::{Scenario, ScenarioHost};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, ValueEnum};
use loot_arbiter::config::EngineConfig;
use loot_arbiter::error::AppError;
use loot_arbiter::workflows::loot::{
    DecisionTrace, DutyId, ItemId, PlayerState, RollCeiling, RollIntent, RollPacer, RollSession,
    TickOutcome,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const TICK_INTERVAL_MS: i64 = 250;
const SIMULATION_LIMIT_MS: i64 = 10 * 60 * 1_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum RollChoice {
    Need,
    Greed,
    Pass,
}

impl RollChoice {
    fn ceiling(self) -> RollCeiling {
        match self {
            RollChoice::Need => RollCeiling::UpToNeed,
            RollChoice::Greed => RollCeiling::UpToGreed,
            RollChoice::Pass => RollCeiling::UpToPass,
        }
    }

    fn intent(self) -> RollIntent {
        match self {
            RollChoice::Need => RollIntent::Need,
            RollChoice::Greed => RollIntent::Greed,
            RollChoice::Pass => RollIntent::Pass,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    /// Scenario file describing the catalog and player state
    #[arg(long)]
    pub(crate) scenario: PathBuf,
    /// Item id to explain (high-quality ids are accepted)
    #[arg(long)]
    pub(crate) item: u32,
    /// Highest roll the game would offer for the item
    #[arg(long, value_enum, default_value = "need")]
    pub(crate) ceiling: RollChoice,
    /// Duty to evaluate duty rules against (defaults to the scenario's duty)
    #[arg(long)]
    pub(crate) scope: Option<u32>,
    /// Print the trace as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Scenario file describing the catalog, player state and loot window
    #[arg(long)]
    pub(crate) scenario: PathBuf,
    /// Manually roll this on everything instead of waiting for auto-roll
    #[arg(long, value_enum)]
    pub(crate) intent: Option<RollChoice>,
    /// Seed for the delay jitter, for reproducible runs
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_explain(args: ExplainArgs, config: &EngineConfig) -> Result<(), AppError> {
    let host = Arc::new(ScenarioHost::new(Scenario::load(&args.scenario)?));
    let session = RollSession::new(host.clone(), host.clone(), host.clone());

    let scope = args.scope.map(DutyId).or_else(|| host.current_scope_id());
    let trace = session.explain(config, ItemId(args.item), args.ceiling.ceiling(), scope);

    if args.json {
        let rendered = serde_json::to_string_pretty(&trace).map_err(AppError::RenderTrace)?;
        println!("{rendered}");
    } else {
        render_trace(&host, &trace);
    }
    Ok(())
}

fn render_trace(host: &ScenarioHost, trace: &DecisionTrace) {
    println!("{} ({})", host.item_name(trace.item_id), trace.item_id);
    println!("  Base intent:        {}", trace.base_intent);
    println!("  Max allowed:        {}", trace.max_allowed);
    match trace.override_verdict {
        Some(verdict) => println!(
            "  Override:           {verdict} ({} rule)",
            trace.override_source
        ),
        None => println!("  Override:           none"),
    }
    println!("  Player restriction: {}", trace.player_restriction);
    println!("  Final:              {}", trace.final_outcome);

    if !trace.diagnostics.is_empty() {
        println!("  Diagnostics:");
        for line in &trace.diagnostics {
            println!("    - {line}");
        }
    }
}

pub(crate) fn run_simulate(args: SimulateArgs, config: &EngineConfig) -> Result<(), AppError> {
    let scenario = Scenario::load(&args.scenario)?;
    let messages = scenario.messages.clone();
    let host = Arc::new(ScenarioHost::new(scenario));

    let pacer = match args.seed {
        Some(seed) => RollPacer::with_rng(StdRng::seed_from_u64(seed)),
        None => RollPacer::new(),
    };
    let mut session =
        RollSession::new(host.clone(), host.clone(), host.clone()).with_pacer(pacer);
    session.sync_scope();

    let start = Utc::now();
    for message in &messages {
        session.on_system_message(config, message, start);
    }
    if let Some(choice) = args.intent {
        session.arm(choice.intent());
    }

    println!("Status: {}", session.status_label(config));
    if session.armed().is_none() {
        println!("Nothing armed; enable auto-roll or pass --intent.");
        return Ok(());
    }

    let mut now = start;
    while now - start <= Duration::milliseconds(SIMULATION_LIMIT_MS) {
        match session.on_tick(config, now, false) {
            TickOutcome::Rolled(submission) => {
                let marker = if submission.emergency_pass {
                    " (emergency pass)"
                } else {
                    ""
                };
                println!(
                    "[{}] slot {}: {} ({}) -> {}{marker}",
                    elapsed(start, now),
                    submission.slot,
                    host.item_name(submission.item_id),
                    submission.item_id,
                    submission.outcome
                );
            }
            TickOutcome::Finished(tally) => {
                println!("[{}] {tally}", elapsed(start, now));
                info!(submissions = host.submissions().len(), "simulation finished");
                return Ok(());
            }
            TickOutcome::Suspended => {
                println!("Rolling suspended: {}", session.status_label(config));
                return Ok(());
            }
            TickOutcome::Idle => return Ok(()),
            TickOutcome::Waiting => {}
        }
        now += Duration::milliseconds(TICK_INTERVAL_MS);
    }

    println!("Simulation stopped after {}", elapsed(start, now));
    Ok(())
}

fn elapsed(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let millis = (now - start).num_milliseconds();
    format!("+{}.{:02}s", millis / 1_000, (millis % 1_000) / 10)
}
