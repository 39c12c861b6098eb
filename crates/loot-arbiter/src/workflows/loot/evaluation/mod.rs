mod ceiling;
mod config;
mod diagnostics;
mod overrides;
mod policy;
mod rules;
mod unlocks;

pub use config::{
    DowngradeVerdict, JobItemLevelRule, RestrictionConfig, ScopedToggle, UnlockedPasses,
    UpgradeRule,
};
pub use diagnostics::Diagnostics;
pub use overrides::{CustomRule, OverrideSource};
pub use policy::{more_restrictive, resolve};

use serde::Serialize;

use super::domain::{DistributionMode, DutyId, ItemId, RollCeiling, RollOutcome};
use super::host::GameData;
use crate::config::EngineConfig;
use unlocks::ResolvedItem;

/// Game-reported facts about the entry being decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollContext {
    pub item_id: ItemId,
    pub ceiling: RollCeiling,
    pub mode: DistributionMode,
    pub scope: Option<DutyId>,
}

/// Intermediate values of one decision, kept for logging and explain queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub max_allowed: RollOutcome,
    pub custom: CustomRule,
    pub player_restriction: RollOutcome,
    pub final_outcome: RollOutcome,
}

/// Explain-mode breakdown of what the engine would do with an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionTrace {
    pub item_id: ItemId,
    pub base_intent: RollOutcome,
    pub max_allowed: RollOutcome,
    #[serde(rename = "override")]
    pub override_verdict: Option<RollOutcome>,
    pub override_source: OverrideSource,
    pub player_restriction: RollOutcome,
    #[serde(rename = "final")]
    pub final_outcome: RollOutcome,
    pub diagnostics: Vec<String>,
}

/// Computes the single allowed outcome for one entry.
///
/// Shared by the live roll loop and explain queries; only the diagnostics
/// accumulator differs between the two.
pub fn evaluate<G>(
    data: &G,
    config: &EngineConfig,
    context: &RollContext,
    base_intent: RollOutcome,
    diagnostics: &mut Diagnostics,
) -> Decision
where
    G: GameData + ?Sized,
{
    let item = ResolvedItem::lookup(data, context.item_id, diagnostics);
    let max_allowed = ceiling::max_allowed(data, &item, context, diagnostics);
    let custom = overrides::lookup(data, &config.rules, &item, context.scope, diagnostics);

    if custom.skips_entry() {
        return Decision {
            max_allowed,
            custom,
            player_restriction: RollOutcome::DoNothing,
            final_outcome: RollOutcome::DoNothing,
        };
    }

    let player_restriction = if custom.verdict.is_none() {
        let can_need = item
            .metadata
            .as_ref()
            .map(|metadata| data.player_job_can_need(metadata))
            .unwrap_or(false);
        rules::player_restriction(data, &config.restrictions, &item, can_need, diagnostics)
    } else {
        RollOutcome::DoNothing
    };

    let final_outcome = resolve(base_intent, max_allowed, custom.verdict, player_restriction);

    Decision {
        max_allowed,
        custom,
        player_restriction,
        final_outcome,
    }
}

/// Previews the decision for an item without touching the loot window.
///
/// Uses the configured automatic intent as the base, or no intent at all while
/// auto-roll is off, and assumes a normal distribution mode.
pub fn explain<G>(
    data: &G,
    config: &EngineConfig,
    item_id: ItemId,
    ceiling: RollCeiling,
    scope: Option<DutyId>,
) -> DecisionTrace
where
    G: GameData + ?Sized,
{
    let base_intent = if config.auto_roll.enabled {
        config.auto_roll.intent.outcome()
    } else {
        RollOutcome::DoNothing
    };
    let context = RollContext {
        item_id: item_id.normalized(),
        ceiling,
        mode: DistributionMode::Normal,
        scope,
    };

    let mut diagnostics = Diagnostics::collecting();
    let decision = evaluate(data, config, &context, base_intent, &mut diagnostics);
    if decision.custom.skips_entry() {
        diagnostics.note(format!(
            "Ignored due to {} custom restriction set to do nothing.",
            decision.custom.source
        ));
    }

    DecisionTrace {
        item_id: context.item_id,
        base_intent,
        max_allowed: decision.max_allowed,
        override_verdict: decision.custom.verdict,
        override_source: decision.custom.source,
        player_restriction: decision.player_restriction,
        final_outcome: decision.final_outcome,
        diagnostics: diagnostics.into_entries(),
    }
}
