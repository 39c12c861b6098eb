use std::fmt;

use serde::{Deserialize, Serialize};

/// Offset the loot window adds to raw ids of high-quality drops.
pub const HIGH_QUALITY_OFFSET: u32 = 1_000_000;

/// Identifier wrapper for item rows in the game data sheets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Strips the high-quality marker so lookups hit the base item row.
    pub fn normalized(self) -> Self {
        if self.0 >= HIGH_QUALITY_OFFSET {
            Self(self.0 - HIGH_QUALITY_OFFSET)
        } else {
            self
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for duties (content finder scopes).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DutyId(pub u32);

impl fmt::Display for DutyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a loot decision. `DoNothing` is the "no verdict yet" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollOutcome {
    #[serde(rename = "need")]
    Needed,
    #[serde(rename = "greed")]
    Greeded,
    #[serde(rename = "pass")]
    Passed,
    #[serde(rename = "do_nothing")]
    DoNothing,
}

impl RollOutcome {
    /// Rank used when merging outcomes; larger means more restrictive.
    /// `DoNothing` ranks below every concrete outcome so it never wins a merge.
    pub fn restrictiveness(self) -> u8 {
        match self {
            RollOutcome::DoNothing => 0,
            RollOutcome::Needed => 1,
            RollOutcome::Greeded => 2,
            RollOutcome::Passed => 3,
        }
    }

    pub fn is_concrete(self) -> bool {
        !matches!(self, RollOutcome::DoNothing)
    }

    pub fn label(self) -> &'static str {
        match self {
            RollOutcome::Needed => "need",
            RollOutcome::Greeded => "greed",
            RollOutcome::Passed => "pass",
            RollOutcome::DoNothing => "do nothing",
        }
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Roll a user arms, either manually or through the automatic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollIntent {
    Need,
    Greed,
    Pass,
}

impl RollIntent {
    pub fn outcome(self) -> RollOutcome {
        match self {
            RollIntent::Need => RollOutcome::Needed,
            RollIntent::Greed => RollOutcome::Greeded,
            RollIntent::Pass => RollOutcome::Passed,
        }
    }

    pub fn status_label(self) -> &'static str {
        match self {
            RollIntent::Need => "Needing",
            RollIntent::Greed => "Greeding",
            RollIntent::Pass => "Passing",
        }
    }
}

/// Highest roll the game currently accepts for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollCeiling {
    UpToNeed,
    UpToGreed,
    UpToPass,
}

impl RollCeiling {
    pub fn as_outcome(self) -> RollOutcome {
        match self {
            RollCeiling::UpToNeed => RollOutcome::Needed,
            RollCeiling::UpToGreed => RollOutcome::Greeded,
            RollCeiling::UpToPass => RollOutcome::Passed,
        }
    }
}

/// Party loot distribution rule in effect for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMode {
    Normal,
    GreedOnly,
    MasterLooterGreedOnly,
    Unavailable,
    /// Any mode this engine does not know how to act on.
    #[serde(other)]
    Unrecognized,
}

impl DistributionMode {
    pub fn ceiling_outcome(self) -> RollOutcome {
        match self {
            DistributionMode::Normal => RollOutcome::Needed,
            DistributionMode::GreedOnly => RollOutcome::Greeded,
            _ => RollOutcome::Passed,
        }
    }

    pub fn is_actionable(self) -> bool {
        !matches!(
            self,
            DistributionMode::MasterLooterGreedOnly | DistributionMode::Unavailable
        )
    }
}

/// One candidate from the current loot window snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item_id: ItemId,
    pub slot: u32,
    pub ceiling: RollCeiling,
    pub mode: DistributionMode,
    #[serde(default)]
    pub weekly_restricted: bool,
    /// The weekly allowance for this entry is already used up; only passing remains.
    #[serde(default)]
    pub weekly_cap_reached: bool,
    #[serde(default)]
    pub already_decided: bool,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl LootEntry {
    pub fn new(item_id: ItemId, slot: u32, ceiling: RollCeiling) -> Self {
        Self {
            item_id,
            slot,
            ceiling,
            mode: DistributionMode::Normal,
            weekly_restricted: false,
            weekly_cap_reached: false,
            already_decided: false,
            available: true,
        }
    }

    /// Whether the scan may consider this entry at all.
    pub fn is_rollable(&self) -> bool {
        self.available
            && !self.already_decided
            && !self.item_id.normalized().is_empty()
            && self.mode.is_actionable()
    }

    /// Weekly-restricted entry that can still be rolled on this week.
    pub fn is_weekly_locked(&self) -> bool {
        self.weekly_restricted && !self.weekly_cap_reached
    }
}

/// Equip slot category row of an equippable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipSlot(pub u32);

/// One-time unlock granted by using an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockAction {
    Mount,
    Minion,
    Barding,
    EmoteHairstyle,
    TripleTriadCard,
    OrchestrionRoll,
}

impl UnlockAction {
    pub fn label(self) -> &'static str {
        match self {
            UnlockAction::Mount => "mounts",
            UnlockAction::Minion => "minions",
            UnlockAction::Barding => "bardings",
            UnlockAction::EmoteHairstyle => "emotes and hairstyles",
            UnlockAction::TripleTriadCard => "triple triad cards",
            UnlockAction::OrchestrionRoll => "orchestrion rolls",
        }
    }
}

/// Sheet data for a single item, as resolved by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMetadata {
    pub id: ItemId,
    pub name: String,
    pub rarity: u8,
    pub unique: bool,
    pub untradeable: bool,
    pub equip_level: u32,
    pub item_level: u32,
    pub equip_slot: Option<EquipSlot>,
    pub has_job_category: bool,
    pub vendor_price: u32,
    pub unlock_action: Option<UnlockAction>,
    /// Craftable intermediate whose unlock state is tracked on its finished counterpart.
    pub is_faded_copy: bool,
}

impl ItemMetadata {
    pub fn is_equipment(&self) -> bool {
        self.equip_slot.is_some()
    }

    /// Level 1 gear with item level 1 only has value as glamour.
    pub fn is_glamour_only(&self) -> bool {
        self.is_equipment() && self.equip_level == 1 && self.item_level == 1
    }

    pub fn converts_to_reward_currency(&self) -> bool {
        self.rarity > 1 && self.vendor_price > 0 && self.has_job_category
    }
}

/// What a user-authored rule is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTarget {
    Item(ItemId),
    Duty(DutyId),
}

/// User-authored override for a single item or a whole duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionRule {
    pub target: RuleTarget,
    #[serde(default)]
    pub enabled: bool,
    pub verdict: RollOutcome,
}

/// Running need/greed/pass counters for one loot window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTally {
    pub need: u32,
    pub greed: u32,
    pub pass: u32,
}

impl RollTally {
    pub fn record(&mut self, outcome: RollOutcome) {
        match outcome {
            RollOutcome::Needed => self.need += 1,
            RollOutcome::Greeded => self.greed += 1,
            _ => self.pass += 1,
        }
    }

    pub fn reverse(&mut self, outcome: RollOutcome) {
        match outcome {
            RollOutcome::Needed => self.need = self.need.saturating_sub(1),
            RollOutcome::Greeded => self.greed = self.greed.saturating_sub(1),
            _ => self.pass = self.pass.saturating_sub(1),
        }
    }

    pub fn total(&self) -> u32 {
        self.need + self.greed + self.pass
    }
}

impl fmt::Display for RollTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn plural(count: u32) -> &'static str {
            if count == 1 {
                "item"
            } else {
                "items"
            }
        }

        write!(
            f,
            "Need {} {}, greed {} {}, pass {} {}.",
            self.need,
            plural(self.need),
            self.greed,
            plural(self.greed),
            self.pass,
            plural(self.pass)
        )
    }
}

/// Roll handed to the host for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub item_id: ItemId,
    pub slot: u32,
    pub outcome: RollOutcome,
    /// The decision was demoted to a pass after a repeated attempt on the same slot.
    pub emergency_pass: bool,
}

/// Result of a single roll-loop invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickResult {
    pub processed: bool,
    pub tally: RollTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<Submission>,
}
