use serde::{Deserialize, Serialize};

use super::super::domain::{ItemMetadata, RollOutcome};

const DEFAULT_JOB_ITEM_LEVEL_THRESHOLD: u32 = 30;

/// Toggles backing the restriction predicate chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictionConfig {
    /// Only roll on unlockables that are still locked; pass everything else.
    pub unlockables_only: bool,
    pub never_pass_glamour: bool,
    pub pass_unlocked: UnlockedPasses,
    pub item_level_floor: Option<u32>,
    pub below_job_item_level: Option<JobItemLevelRule>,
    pub not_job_upgrade: Option<UpgradeRule>,
    pub reward_currency_floor: Option<u32>,
    pub other_job_items: bool,
    pub weekly_lockout: bool,
}

impl Default for RestrictionConfig {
    fn default() -> Self {
        Self {
            unlockables_only: false,
            never_pass_glamour: true,
            pass_unlocked: UnlockedPasses::default(),
            item_level_floor: None,
            below_job_item_level: None,
            not_job_upgrade: None,
            reward_currency_floor: None,
            other_job_items: false,
            weekly_lockout: false,
        }
    }
}

/// Pass toggles for items whose unlock the player already owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnlockedPasses {
    pub all: ScopedToggle,
    pub faded_copies: ScopedToggle,
    pub mounts: ScopedToggle,
    pub minions: ScopedToggle,
    pub bardings: ScopedToggle,
    pub emotes_hairstyles: ScopedToggle,
    pub triple_triad_cards: ScopedToggle,
    pub orchestrion_rolls: ScopedToggle,
}

/// A pass toggle that can be narrowed to untradeable items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopedToggle {
    pub enabled: bool,
    pub only_untradeable: bool,
}

impl ScopedToggle {
    pub fn on() -> Self {
        Self {
            enabled: true,
            only_untradeable: false,
        }
    }

    pub fn applies_to(&self, item: &ItemMetadata) -> bool {
        self.enabled && (!self.only_untradeable || item.untradeable)
    }
}

/// Roll used when gear is judged not worth needing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DowngradeVerdict {
    Greed,
    #[default]
    Pass,
}

impl DowngradeVerdict {
    pub fn outcome(self) -> RollOutcome {
        match self {
            DowngradeVerdict::Greed => RollOutcome::Greeded,
            DowngradeVerdict::Pass => RollOutcome::Passed,
        }
    }
}

/// Gear more than `threshold` item levels below the player's current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobItemLevelRule {
    pub threshold: u32,
    pub verdict: DowngradeVerdict,
}

impl Default for JobItemLevelRule {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_JOB_ITEM_LEVEL_THRESHOLD,
            verdict: DowngradeVerdict::Pass,
        }
    }
}

/// Gear that is not an upgrade over what is equipped in the same slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeRule {
    pub verdict: DowngradeVerdict,
}
