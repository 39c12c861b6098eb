use loot_arbiter::error::AppError;
use loot_arbiter::workflows::loot::{
    DutyId, EquipSlot, ItemCatalog, ItemId, ItemMetadata, LootEntry, LootSubmitter, LootWindow,
    PlayerState, RollOutcome, SystemNotice,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Recorded game state a simulation runs against.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Scenario {
    pub(crate) items: Vec<ItemMetadata>,
    pub(crate) recipes: Vec<RecipeLink>,
    pub(crate) unlockable: Vec<ItemId>,
    pub(crate) unlocked: Vec<ItemId>,
    pub(crate) inventory: Vec<InventoryStack>,
    /// Currently equipped gear; slots come from each item's sheet row.
    pub(crate) equipped: Vec<ItemId>,
    pub(crate) currency: Vec<CurrencyRow>,
    pub(crate) weekly_duties: Vec<DutyId>,
    /// Items the current job cannot need.
    pub(crate) off_job: Vec<ItemId>,
    pub(crate) player_item_level: u32,
    pub(crate) scope: Option<DutyId>,
    pub(crate) notices: Notices,
    /// System chat lines replayed before the first tick.
    pub(crate) messages: Vec<String>,
    pub(crate) window: Vec<LootEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RecipeLink {
    pub(crate) faded: ItemId,
    pub(crate) finished: ItemId,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct InventoryStack {
    pub(crate) item: ItemId,
    pub(crate) count: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct CurrencyRow {
    pub(crate) item_level: u32,
    pub(crate) value: u32,
}

/// Localized text of the system notices the engine listens for.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct Notices {
    pub(crate) loot_window_opened: String,
    pub(crate) weekly_lockout_reached: String,
}

impl Default for Notices {
    fn default() -> Self {
        Self {
            loot_window_opened: "Cast your lot.".to_string(),
            weekly_lockout_reached:
                "You cannot receive any more rewards from this duty until next week.".to_string(),
        }
    }
}

impl Scenario {
    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|err| AppError::read_scenario(path, err))?;
        serde_json::from_str(&raw).map_err(|err| AppError::parse_scenario(path, err))
    }
}

/// In-memory host backed by a scenario file.
///
/// Submissions mark the matching entry as decided so the next scan moves on.
pub(crate) struct ScenarioHost {
    items: HashMap<ItemId, ItemMetadata>,
    recipes: HashMap<ItemId, ItemId>,
    unlockable: HashSet<ItemId>,
    unlocked: HashSet<ItemId>,
    inventory: HashMap<ItemId, u32>,
    equipped: Vec<ItemId>,
    currency: HashMap<u32, u32>,
    weekly_duties: HashSet<DutyId>,
    off_job: HashSet<ItemId>,
    player_item_level: u32,
    scope: Option<DutyId>,
    notices: Notices,
    window: Mutex<Vec<LootEntry>>,
    submissions: Mutex<Vec<(RollOutcome, u32)>>,
}

impl ScenarioHost {
    pub(crate) fn new(scenario: Scenario) -> Self {
        Self {
            items: scenario
                .items
                .into_iter()
                .map(|item| (item.id, item))
                .collect(),
            recipes: scenario
                .recipes
                .iter()
                .map(|link| (link.faded, link.finished))
                .collect(),
            unlockable: scenario.unlockable.into_iter().collect(),
            unlocked: scenario.unlocked.into_iter().collect(),
            inventory: scenario
                .inventory
                .iter()
                .map(|stack| (stack.item, stack.count))
                .collect(),
            equipped: scenario.equipped,
            currency: scenario
                .currency
                .iter()
                .map(|row| (row.item_level, row.value))
                .collect(),
            weekly_duties: scenario.weekly_duties.into_iter().collect(),
            off_job: scenario.off_job.into_iter().collect(),
            player_item_level: scenario.player_item_level,
            scope: scenario.scope,
            notices: scenario.notices,
            window: Mutex::new(scenario.window),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn item_name(&self, id: ItemId) -> String {
        self.items
            .get(&id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| format!("unknown item {id}"))
    }

    pub(crate) fn submissions(&self) -> Vec<(RollOutcome, u32)> {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .clone()
    }
}

impl ItemCatalog for ScenarioHost {
    fn resolve_item(&self, id: ItemId) -> Option<ItemMetadata> {
        self.items.get(&id).cloned()
    }

    fn resolve_recipe_target(&self, faded: ItemId) -> Option<ItemId> {
        self.recipes.get(&faded).copied()
    }

    fn is_unlockable(&self, item: &ItemMetadata) -> bool {
        item.unlock_action.is_some() || self.unlockable.contains(&item.id)
    }

    fn currency_value(&self, item_level: u32) -> Option<u32> {
        self.currency.get(&item_level).copied()
    }

    fn scope_qualifies_for_weekly_lockout(&self, scope: DutyId) -> bool {
        self.weekly_duties.contains(&scope)
    }

    fn system_notice(&self, notice: SystemNotice) -> Option<String> {
        let text = match notice {
            SystemNotice::LootWindowOpened => &self.notices.loot_window_opened,
            SystemNotice::WeeklyLockoutReached => &self.notices.weekly_lockout_reached,
        };
        (!text.is_empty()).then(|| text.clone())
    }
}

impl PlayerState for ScenarioHost {
    fn is_unlocked(&self, id: ItemId) -> bool {
        self.unlocked.contains(&id)
    }

    fn inventory_count(&self, id: ItemId) -> u32 {
        self.inventory.get(&id).copied().unwrap_or(0)
    }

    fn equipped_items_in_slot(&self, slot: EquipSlot) -> Vec<ItemId> {
        self.equipped
            .iter()
            .copied()
            .filter(|id| {
                self.items
                    .get(id)
                    .is_some_and(|item| item.equip_slot == Some(slot))
            })
            .collect()
    }

    fn player_item_level(&self) -> u32 {
        self.player_item_level
    }

    fn player_job_can_need(&self, item: &ItemMetadata) -> bool {
        !self.off_job.contains(&item.id)
    }

    fn current_scope_id(&self) -> Option<DutyId> {
        self.scope
    }
}

impl LootWindow for ScenarioHost {
    fn enumerate_loot_window(&self) -> Vec<LootEntry> {
        self.window.lock().expect("window mutex poisoned").clone()
    }
}

impl LootSubmitter for ScenarioHost {
    fn submit(&self, outcome: RollOutcome, slot: u32) {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .push((outcome, slot));

        let mut window = self.window.lock().expect("window mutex poisoned");
        if let Some(entry) = window.iter_mut().find(|entry| entry.slot == slot) {
            entry.already_decided = true;
        }
    }
}
