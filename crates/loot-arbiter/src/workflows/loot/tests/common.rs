use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::workflows::loot::{
    DutyId, EquipSlot, ItemCatalog, ItemId, ItemMetadata, LootEntry, LootSubmitter, LootWindow,
    PlayerState, RestrictionRule, RollCeiling, RollOutcome, RollPacer, RollSession, RuleTarget,
    SystemNotice, UnlockAction,
};

pub(super) const LOOT_NOTICE: &str = "Cast your lot.";
pub(super) const WEEKLY_NOTICE: &str =
    "You cannot receive any more rewards from this duty until next week.";
pub(super) const RAID: DutyId = DutyId(1_001);
pub(super) const DUNGEON: DutyId = DutyId(2_002);
pub(super) const BODY: EquipSlot = EquipSlot(4);

/// In-memory game client: sheet rows, player state, loot window and submit recorder.
#[derive(Default)]
pub(super) struct FakeGame {
    items: HashMap<ItemId, ItemMetadata>,
    recipes: HashMap<ItemId, ItemId>,
    unlockable: HashSet<ItemId>,
    unlocked: HashSet<ItemId>,
    inventory: HashMap<ItemId, u32>,
    equipped: HashMap<EquipSlot, Vec<ItemId>>,
    currency: HashMap<u32, u32>,
    weekly_scopes: HashSet<DutyId>,
    off_job: HashSet<ItemId>,
    player_item_level: u32,
    /// Submitted entries disappear from the window, as they do in game.
    settle_on_submit: bool,
    scope: Mutex<Option<DutyId>>,
    window: Mutex<Vec<LootEntry>>,
    submissions: Mutex<Vec<(RollOutcome, u32)>>,
}

impl FakeGame {
    pub(super) fn new() -> Self {
        Self {
            player_item_level: 600,
            settle_on_submit: true,
            ..Self::default()
        }
    }

    pub(super) fn with_item(mut self, item: ItemMetadata) -> Self {
        self.items.insert(item.id, item);
        self
    }

    pub(super) fn with_unlockable(mut self, id: u32) -> Self {
        self.unlockable.insert(ItemId(id));
        self
    }

    pub(super) fn with_unlocked(mut self, id: u32) -> Self {
        self.unlocked.insert(ItemId(id));
        self
    }

    pub(super) fn with_recipe(mut self, faded: u32, finished: u32) -> Self {
        self.recipes.insert(ItemId(faded), ItemId(finished));
        self
    }

    pub(super) fn with_inventory(mut self, id: u32, count: u32) -> Self {
        self.inventory.insert(ItemId(id), count);
        self
    }

    pub(super) fn with_equipped(mut self, slot: EquipSlot, ids: &[u32]) -> Self {
        self.equipped
            .insert(slot, ids.iter().copied().map(ItemId).collect());
        self
    }

    pub(super) fn with_currency(mut self, item_level: u32, value: u32) -> Self {
        self.currency.insert(item_level, value);
        self
    }

    pub(super) fn with_weekly_scope(mut self, scope: DutyId) -> Self {
        self.weekly_scopes.insert(scope);
        self
    }

    pub(super) fn with_off_job(mut self, id: u32) -> Self {
        self.off_job.insert(ItemId(id));
        self
    }

    pub(super) fn with_player_item_level(mut self, level: u32) -> Self {
        self.player_item_level = level;
        self
    }

    pub(super) fn with_scope(self, scope: DutyId) -> Self {
        self.enter(Some(scope));
        self
    }

    pub(super) fn with_window(self, entries: Vec<LootEntry>) -> Self {
        *self.window.lock().expect("window mutex poisoned") = entries;
        self
    }

    /// Submissions are accepted but the window never reflects them.
    pub(super) fn dropping_submissions(mut self) -> Self {
        self.settle_on_submit = false;
        self
    }

    pub(super) fn enter(&self, scope: Option<DutyId>) {
        *self.scope.lock().expect("scope mutex poisoned") = scope;
    }

    pub(super) fn submissions(&self) -> Vec<(RollOutcome, u32)> {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .clone()
    }
}

impl ItemCatalog for FakeGame {
    fn resolve_item(&self, id: ItemId) -> Option<ItemMetadata> {
        self.items.get(&id).cloned()
    }

    fn resolve_recipe_target(&self, faded: ItemId) -> Option<ItemId> {
        self.recipes.get(&faded).copied()
    }

    fn is_unlockable(&self, item: &ItemMetadata) -> bool {
        self.unlockable.contains(&item.id) || item.unlock_action.is_some()
    }

    fn currency_value(&self, item_level: u32) -> Option<u32> {
        self.currency.get(&item_level).copied()
    }

    fn scope_qualifies_for_weekly_lockout(&self, scope: DutyId) -> bool {
        self.weekly_scopes.contains(&scope)
    }

    fn system_notice(&self, notice: SystemNotice) -> Option<String> {
        let text = match notice {
            SystemNotice::LootWindowOpened => LOOT_NOTICE,
            SystemNotice::WeeklyLockoutReached => WEEKLY_NOTICE,
        };
        Some(text.to_string())
    }
}

impl PlayerState for FakeGame {
    fn is_unlocked(&self, id: ItemId) -> bool {
        self.unlocked.contains(&id)
    }

    fn inventory_count(&self, id: ItemId) -> u32 {
        self.inventory.get(&id).copied().unwrap_or(0)
    }

    fn equipped_items_in_slot(&self, slot: EquipSlot) -> Vec<ItemId> {
        self.equipped.get(&slot).cloned().unwrap_or_default()
    }

    fn player_item_level(&self) -> u32 {
        self.player_item_level
    }

    fn player_job_can_need(&self, item: &ItemMetadata) -> bool {
        !self.off_job.contains(&item.id)
    }

    fn current_scope_id(&self) -> Option<DutyId> {
        *self.scope.lock().expect("scope mutex poisoned")
    }
}

impl LootWindow for FakeGame {
    fn enumerate_loot_window(&self) -> Vec<LootEntry> {
        self.window.lock().expect("window mutex poisoned").clone()
    }
}

impl LootSubmitter for FakeGame {
    fn submit(&self, outcome: RollOutcome, slot: u32) {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .push((outcome, slot));

        if self.settle_on_submit {
            let mut window = self.window.lock().expect("window mutex poisoned");
            if let Some(entry) = window.iter_mut().find(|entry| entry.slot == slot) {
                entry.already_decided = true;
            }
        }
    }
}

pub(super) fn gear(id: u32, name: &str, item_level: u32) -> ItemMetadata {
    ItemMetadata {
        id: ItemId(id),
        name: name.to_string(),
        rarity: 3,
        equip_level: 90,
        item_level,
        equip_slot: Some(BODY),
        has_job_category: true,
        vendor_price: 1_200,
        ..ItemMetadata::default()
    }
}

pub(super) fn unlockable(id: u32, name: &str, action: UnlockAction) -> ItemMetadata {
    ItemMetadata {
        id: ItemId(id),
        name: name.to_string(),
        rarity: 1,
        unique: true,
        untradeable: true,
        unlock_action: Some(action),
        ..ItemMetadata::default()
    }
}

pub(super) fn material(id: u32, name: &str) -> ItemMetadata {
    ItemMetadata {
        id: ItemId(id),
        name: name.to_string(),
        rarity: 1,
        vendor_price: 15,
        ..ItemMetadata::default()
    }
}

pub(super) fn entry(id: u32, slot: u32, ceiling: RollCeiling) -> LootEntry {
    LootEntry::new(ItemId(id), slot, ceiling)
}

pub(super) fn item_rule(id: u32, verdict: RollOutcome) -> RestrictionRule {
    RestrictionRule {
        target: RuleTarget::Item(ItemId(id)),
        enabled: true,
        verdict,
    }
}

pub(super) fn duty_rule(scope: DutyId, verdict: RollOutcome) -> RestrictionRule {
    RestrictionRule {
        target: RuleTarget::Duty(scope),
        enabled: true,
        verdict,
    }
}

/// Engine settings with every restriction off, so only the base intent and ceiling matter.
pub(super) fn plain_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.restrictions.never_pass_glamour = false;
    config
}

pub(super) fn session(game: &Arc<FakeGame>) -> RollSession<FakeGame, FakeGame, FakeGame> {
    RollSession::new(game.clone(), game.clone(), game.clone())
        .with_pacer(RollPacer::with_rng(StdRng::seed_from_u64(42)))
}

pub(super) fn at(seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 20, 0, 0)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::seconds(seconds)
}
