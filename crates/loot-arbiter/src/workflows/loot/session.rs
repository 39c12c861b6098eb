use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::{DutyId, ItemId, RollCeiling, RollIntent, RollTally, Submission};
use super::evaluation::DecisionTrace;
use super::host::{GameData, LootSubmitter, LootWindow, SystemNotice};
use super::lockout::WeeklyLockout;
use super::pacing::RollPacer;
use super::roller::RollEngine;
use crate::config::EngineConfig;

const WEEKLY_LOCKOUT_SUFFIX: &str = " (Disabled | WLD)";

/// What a single host tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No roll request is armed.
    Idle,
    /// The weekly lockout latch is holding the roll loop.
    Suspended,
    /// Armed, but the pacing deadline has not passed or the player is busy.
    Waiting,
    Rolled(Submission),
    /// The window has nothing left to roll on; carries the totals for this request.
    Finished(RollTally),
}

/// Host-facing driver wiring the roll loop to pacing, message events and the lockout latch.
pub struct RollSession<G, W, S> {
    engine: RollEngine<G, W, S>,
    lockout: WeeklyLockout,
    pacer: RollPacer,
    armed: Option<RollIntent>,
}

impl<G, W, S> RollSession<G, W, S>
where
    G: GameData + 'static,
    W: LootWindow + 'static,
    S: LootSubmitter + 'static,
{
    pub fn new(data: Arc<G>, window: Arc<W>, submitter: Arc<S>) -> Self {
        Self {
            engine: RollEngine::new(data, window, submitter),
            lockout: WeeklyLockout::new(),
            pacer: RollPacer::new(),
            armed: None,
        }
    }

    pub fn with_pacer(mut self, pacer: RollPacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_lockout(mut self, lockout: WeeklyLockout) -> Self {
        self.lockout = lockout;
        self
    }

    /// Manual request to roll `intent` on everything currently lootable.
    pub fn arm(&mut self, intent: RollIntent) {
        debug!(intent = intent.status_label(), "roll request armed");
        self.armed = Some(intent);
    }

    pub fn armed(&self) -> Option<RollIntent> {
        self.armed
    }

    /// Handles a system chat line. Returns true when it armed an automatic roll.
    pub fn on_system_message(
        &mut self,
        config: &EngineConfig,
        text: &str,
        now: DateTime<Utc>,
    ) -> bool {
        let data = Arc::clone(self.engine.data());
        let scope = data.current_scope_id();
        self.lockout.observe_system_message(
            &*data,
            config.restrictions.weekly_lockout,
            scope,
            text,
        );

        if !config.auto_roll.enabled {
            return false;
        }

        let opened = data
            .system_notice(SystemNotice::LootWindowOpened)
            .is_some_and(|notice| notice.trim() == text.trim());
        if !opened {
            return false;
        }

        let deadline = self.pacer.schedule_auto(now, &config.delays);
        self.armed = Some(config.auto_roll.intent);
        info!(
            intent = config.auto_roll.intent.status_label(),
            %deadline,
            "loot window opened, auto-roll armed"
        );
        true
    }

    /// Territory change notification.
    pub fn on_scope_changed(&mut self, scope: Option<DutyId>) {
        let data = Arc::clone(self.engine.data());
        self.lockout.on_scope_changed(&*data, scope);
    }

    /// Re-checks a restored lockout against wherever the player currently is.
    pub fn sync_scope(&mut self) {
        let data = Arc::clone(self.engine.data());
        let scope = data.current_scope_id();
        self.lockout.on_scope_changed(&*data, scope);
    }

    /// Periodic host callback; submits at most one roll.
    pub fn on_tick(
        &mut self,
        config: &EngineConfig,
        now: DateTime<Utc>,
        in_cutscene: bool,
    ) -> TickOutcome {
        if config.restrictions.weekly_lockout && self.lockout.is_active() {
            return TickOutcome::Suspended;
        }

        let Some(intent) = self.armed else {
            return TickOutcome::Idle;
        };

        if !self.pacer.ready(now) || in_cutscene {
            return TickOutcome::Waiting;
        }

        self.pacer.schedule_manual(now, &config.delays);

        let result = self.engine.process_one_tick(intent.outcome(), config);
        if let (true, Some(submission)) = (result.processed, result.submitted) {
            return TickOutcome::Rolled(submission);
        }

        let tally = self.engine.take_tally();
        self.engine.clear_memory();
        self.armed = None;
        info!(
            need = tally.need,
            greed = tally.greed,
            pass = tally.pass,
            "{tally}"
        );
        TickOutcome::Finished(tally)
    }

    /// Status bar text for the current mode.
    pub fn status_label(&self, config: &EngineConfig) -> String {
        let mut label = if config.auto_roll.enabled {
            config.auto_roll.intent.status_label().to_string()
        } else {
            "Auto-roll disabled".to_string()
        };

        if config.restrictions.weekly_lockout && self.lockout.is_active() {
            label.push_str(WEEKLY_LOCKOUT_SUFFIX);
        }
        label
    }

    pub fn lockout(&self) -> &WeeklyLockout {
        &self.lockout
    }

    pub fn engine(&self) -> &RollEngine<G, W, S> {
        &self.engine
    }

    pub fn explain(
        &self,
        config: &EngineConfig,
        item_id: ItemId,
        ceiling: RollCeiling,
        scope: Option<DutyId>,
    ) -> DecisionTrace {
        self.engine.explain(config, item_id, ceiling, scope)
    }
}
