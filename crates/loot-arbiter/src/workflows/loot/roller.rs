use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{
    DutyId, ItemId, LootEntry, RollCeiling, RollOutcome, RollTally, Submission, TickResult,
};
use super::evaluation::{self, Decision, DecisionTrace, Diagnostics, RollContext};
use super::host::{GameData, LootSubmitter, LootWindow};
use crate::config::EngineConfig;

/// Identity of the last submission, used to detect a roll the host silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollAttempt {
    pub item_id: ItemId,
    pub slot: u32,
    pub outcome: RollOutcome,
}

/// Per-window roll loop: decides and submits at most one entry per call.
pub struct RollEngine<G, W, S> {
    data: Arc<G>,
    window: Arc<W>,
    submitter: Arc<S>,
    memory: Option<RollAttempt>,
    tally: RollTally,
}

impl<G, W, S> RollEngine<G, W, S>
where
    G: GameData + 'static,
    W: LootWindow + 'static,
    S: LootSubmitter + 'static,
{
    pub fn new(data: Arc<G>, window: Arc<W>, submitter: Arc<S>) -> Self {
        Self {
            data,
            window,
            submitter,
            memory: None,
            tally: RollTally::default(),
        }
    }

    /// Scans the loot window and submits a roll for the first eligible entry.
    ///
    /// Returns `processed == false` when nothing is left to roll on; calling
    /// again in that state is a no-op.
    pub fn process_one_tick(&mut self, intent: RollOutcome, config: &EngineConfig) -> TickResult {
        let scope = self.data.current_scope_id();

        for entry in self.window.enumerate_loot_window() {
            if !entry.is_rollable() {
                continue;
            }

            let context = RollContext {
                item_id: entry.item_id.normalized(),
                ceiling: entry.ceiling,
                mode: entry.mode,
                scope,
            };
            let mut diagnostics = Diagnostics::silent();
            let decision =
                evaluation::evaluate(&*self.data, config, &context, intent, &mut diagnostics);

            if decision.custom.skips_entry() {
                debug!(
                    item_id = %context.item_id,
                    slot = entry.slot,
                    source = %decision.custom.source,
                    "skipping entry with do-nothing override"
                );
                continue;
            }

            if weekly_filter_applies(config, &decision, &entry) {
                debug!(
                    item_id = %context.item_id,
                    slot = entry.slot,
                    "skipping weekly-locked entry"
                );
                continue;
            }

            let submission = self.submit(context.item_id, entry.slot, decision, config);
            return TickResult {
                processed: true,
                tally: self.tally,
                submitted: Some(submission),
            };
        }

        TickResult {
            processed: false,
            tally: self.tally,
            submitted: None,
        }
    }

    fn submit(
        &mut self,
        item_id: ItemId,
        slot: u32,
        decision: Decision,
        config: &EngineConfig,
    ) -> Submission {
        let mut outcome = decision.final_outcome;
        let mut emergency_pass = false;

        if let Some(previous) = self.memory {
            if previous.item_id == item_id && previous.slot == slot && !config.never_emergency_pass
            {
                self.tally.reverse(previous.outcome);
                outcome = RollOutcome::Passed;
                emergency_pass = true;
                warn!(
                    item_id = %item_id,
                    slot,
                    previous = %previous.outcome,
                    "previous roll did not register, passing instead"
                );
            }
        }

        self.submitter.submit(outcome, slot);
        self.memory = Some(RollAttempt {
            item_id,
            slot,
            outcome,
        });
        self.tally.record(outcome);

        info!(
            item_id = %item_id,
            slot,
            outcome = %outcome,
            max_allowed = %decision.max_allowed,
            "submitted roll"
        );

        Submission {
            item_id,
            slot,
            outcome,
            emergency_pass,
        }
    }

    /// Forgets the last submission so the next attempt on any slot is taken at face value.
    pub fn clear_memory(&mut self) {
        self.memory = None;
    }

    pub fn last_attempt(&self) -> Option<RollAttempt> {
        self.memory
    }

    pub fn tally(&self) -> RollTally {
        self.tally
    }

    /// Returns the counters accumulated so far and resets them.
    pub fn take_tally(&mut self) -> RollTally {
        std::mem::take(&mut self.tally)
    }

    pub fn data(&self) -> &Arc<G> {
        &self.data
    }

    pub fn explain(
        &self,
        config: &EngineConfig,
        item_id: ItemId,
        ceiling: RollCeiling,
        scope: Option<DutyId>,
    ) -> DecisionTrace {
        evaluation::explain(&*self.data, config, item_id, ceiling, scope)
    }
}

/// Weekly-locked entries are left alone unless an item rule names them directly.
fn weekly_filter_applies(config: &EngineConfig, decision: &Decision, entry: &LootEntry) -> bool {
    config.restrictions.weekly_lockout
        && !config.restrictions.unlockables_only
        && !decision.custom.is_item_scoped()
        && entry.is_weekly_locked()
}
