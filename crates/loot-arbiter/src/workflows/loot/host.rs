use super::domain::{DutyId, EquipSlot, ItemId, ItemMetadata, LootEntry, RollOutcome};

/// Localized system notices the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemNotice {
    /// A fresh set of loot was offered to the party.
    LootWindowOpened,
    /// The weekly reward cap for the current duty has been reached.
    WeeklyLockoutReached,
}

/// Read-only sheet lookups (items, recipes, duties, message text).
pub trait ItemCatalog: Send + Sync {
    fn resolve_item(&self, id: ItemId) -> Option<ItemMetadata>;
    /// Maps a faded copy to the finished item whose unlock state it shares.
    fn resolve_recipe_target(&self, faded: ItemId) -> Option<ItemId>;
    fn is_unlockable(&self, item: &ItemMetadata) -> bool;
    /// Reward currency granted when turning in gear of the given item level.
    fn currency_value(&self, item_level: u32) -> Option<u32>;
    fn scope_qualifies_for_weekly_lockout(&self, scope: DutyId) -> bool;
    fn system_notice(&self, notice: SystemNotice) -> Option<String>;
}

/// Read-only view of the local player's state.
pub trait PlayerState: Send + Sync {
    fn is_unlocked(&self, id: ItemId) -> bool;
    fn inventory_count(&self, id: ItemId) -> u32;
    fn equipped_items_in_slot(&self, slot: EquipSlot) -> Vec<ItemId>;
    fn player_item_level(&self) -> u32;
    fn player_job_can_need(&self, item: &ItemMetadata) -> bool;
    fn current_scope_id(&self) -> Option<DutyId>;
}

/// Everything the decision logic reads from the host.
pub trait GameData: ItemCatalog + PlayerState {}

impl<T> GameData for T where T: ItemCatalog + PlayerState {}

/// Snapshot source for the lootable entries offered this tick.
pub trait LootWindow: Send + Sync {
    fn enumerate_loot_window(&self) -> Vec<LootEntry>;
}

/// The single side-effecting call: submit a roll for a loot window slot.
///
/// Fire-and-forget; the host reports no success signal back.
pub trait LootSubmitter: Send + Sync {
    fn submit(&self, outcome: RollOutcome, slot: u32);
}
