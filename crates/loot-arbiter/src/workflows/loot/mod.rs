//! Loot-roll decisions for a party loot window.
//!
//! `evaluation` turns one entry plus the player's state into a single outcome,
//! `roller` submits at most one decision per call, and `session` wires the
//! roll loop to host events, pacing and the weekly lockout latch.

pub mod domain;
pub mod evaluation;
pub mod host;
mod lockout;
mod pacing;
mod roller;
mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    DistributionMode, DutyId, EquipSlot, ItemId, ItemMetadata, LootEntry, RestrictionRule,
    RollCeiling, RollIntent, RollOutcome, RollTally, RuleTarget, Submission, TickResult,
    UnlockAction, HIGH_QUALITY_OFFSET,
};
pub use evaluation::{
    evaluate, explain, more_restrictive, resolve, CustomRule, Decision, DecisionTrace,
    Diagnostics, DowngradeVerdict, JobItemLevelRule, OverrideSource, RestrictionConfig,
    RollContext, ScopedToggle, UnlockedPasses, UpgradeRule,
};
pub use host::{GameData, ItemCatalog, LootSubmitter, LootWindow, PlayerState, SystemNotice};
pub use lockout::{LockoutState, WeeklyLockout};
pub use pacing::{RollPacer, MANUAL_DELAY_FLOOR_MS};
pub use roller::{RollAttempt, RollEngine};
pub use session::{RollSession, TickOutcome};
