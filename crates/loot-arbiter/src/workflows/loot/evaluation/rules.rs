use super::super::domain::{ItemMetadata, RollOutcome, UnlockAction};
use super::super::host::GameData;
use super::config::{RestrictionConfig, ScopedToggle, UnlockedPasses};
use super::diagnostics::Diagnostics;
use super::unlocks::ResolvedItem;

/// Runs the restriction predicates in their fixed order.
///
/// Returns the first forcing verdict, or `DoNothing` when no predicate has an
/// opinion and the base intent should stand.
pub(crate) fn player_restriction<G>(
    data: &G,
    config: &RestrictionConfig,
    item: &ResolvedItem,
    can_need: bool,
    diagnostics: &mut Diagnostics,
) -> RollOutcome
where
    G: GameData + ?Sized,
{
    let Some(metadata) = item.metadata.as_ref() else {
        diagnostics.alert(format!(
            "Passing unknown item {}; it could not be resolved. [Unknown ID]",
            item.id
        ));
        return RollOutcome::Passed;
    };

    if config.unlockables_only {
        return unlockables_only(data, item, metadata, diagnostics);
    }

    if metadata.unique && data.inventory_count(item.id) > 0 {
        diagnostics.note(format!(
            "{} has been passed due to being unique and you already possess one. [Unique Item]",
            metadata.name
        ));
        return RollOutcome::Passed;
    }

    if config.never_pass_glamour && metadata.is_glamour_only() {
        diagnostics.note(format!(
            "{} has been set to not pass if possible due to being a glamour item. [Never Pass Glam]",
            metadata.name
        ));
        return RollOutcome::Needed;
    }

    if let Some(verdict) = unlocked_passes(data, &config.pass_unlocked, item, metadata, diagnostics)
    {
        return verdict;
    }

    if let Some(floor) = config.reward_currency_floor {
        if metadata.converts_to_reward_currency() {
            if let Some(value) = data.currency_value(metadata.item_level) {
                if value < floor {
                    diagnostics.note(format!(
                        "{} has been passed due to not reaching your reward currency amount (Set: {floor} | Item: {value}) [Pass Seals]",
                        metadata.name
                    ));
                    return RollOutcome::Passed;
                }
            }
        }
    }

    if metadata.is_equipment() {
        if let Some(verdict) = equipment_checks(data, config, metadata, diagnostics) {
            return verdict;
        }
    }

    // Job-restricted coffers and weapon sets carry a job category without an equip slot.
    let job_gated = metadata.is_equipment() || metadata.has_job_category;
    if config.other_job_items && job_gated && !can_need {
        diagnostics.alert(format!(
            "{} has been passed due to not being an item for your current job. [Pass Not For Job]",
            metadata.name
        ));
        return RollOutcome::Passed;
    }

    RollOutcome::DoNothing
}

fn unlockables_only<G>(
    data: &G,
    item: &ResolvedItem,
    metadata: &ItemMetadata,
    diagnostics: &mut Diagnostics,
) -> RollOutcome
where
    G: GameData + ?Sized,
{
    if !item.is_unlockable(data) {
        diagnostics.note(format!(
            "{} has been passed due to Unlockables Only mode. [Unlockables Only - Not an Unlockable]",
            metadata.name
        ));
        return RollOutcome::Passed;
    }

    if !item.is_unlocked(data) {
        return RollOutcome::DoNothing;
    }

    diagnostics.note(format!(
        "{} has been passed because it is already unlocked. [Unlockables Only - Already Unlocked]",
        metadata.name
    ));
    RollOutcome::Passed
}

fn unlocked_passes<G>(
    data: &G,
    passes: &UnlockedPasses,
    item: &ResolvedItem,
    metadata: &ItemMetadata,
    diagnostics: &mut Diagnostics,
) -> Option<RollOutcome>
where
    G: GameData + ?Sized,
{
    if item.faded_targets_unlocked(data) {
        if passes.all.applies_to(metadata) {
            diagnostics.note(pass_all_message(metadata));
            return Some(RollOutcome::Passed);
        }

        if passes.faded_copies.applies_to(metadata) && metadata.is_faded_copy {
            diagnostics.note(format!(
                "{} has been passed due to being unlocked and you have \"Pass on unlocked Faded Copies\" enabled. [Pass Faded Copies]",
                metadata.name
            ));
            return Some(RollOutcome::Passed);
        }
    }

    if !item.is_unlocked(data) {
        return None;
    }

    if passes.all.applies_to(metadata) {
        diagnostics.note(pass_all_message(metadata));
        return Some(RollOutcome::Passed);
    }

    let action = metadata.unlock_action?;
    if category_toggle(passes, action).applies_to(metadata) {
        diagnostics.note(format!(
            "{} has been passed due to being unlocked and you have \"Pass on unlocked {}\" enabled. [Pass Unlocked Category]",
            metadata.name,
            action.label()
        ));
        return Some(RollOutcome::Passed);
    }

    None
}

fn pass_all_message(metadata: &ItemMetadata) -> String {
    format!(
        "{} has been passed due to being unlocked and you have \"Pass on all items already unlocked\" enabled. [Pass All Unlocked]",
        metadata.name
    )
}

fn category_toggle(passes: &UnlockedPasses, action: UnlockAction) -> ScopedToggle {
    match action {
        UnlockAction::Mount => passes.mounts,
        UnlockAction::Minion => passes.minions,
        UnlockAction::Barding => passes.bardings,
        UnlockAction::EmoteHairstyle => passes.emotes_hairstyles,
        UnlockAction::TripleTriadCard => passes.triple_triad_cards,
        UnlockAction::OrchestrionRoll => passes.orchestrion_rolls,
    }
}

fn equipment_checks<G>(
    data: &G,
    config: &RestrictionConfig,
    metadata: &ItemMetadata,
    diagnostics: &mut Diagnostics,
) -> Option<RollOutcome>
where
    G: GameData + ?Sized,
{
    if let Some(floor) = config.item_level_floor {
        if metadata.item_level < floor {
            diagnostics.note(format!(
                "{} has been passed due to not reaching the item level required (Set: {floor} | Item: {}) [Pass Item Level]",
                metadata.name, metadata.item_level
            ));
            return Some(RollOutcome::Passed);
        }
    }

    if let Some(rule) = config.below_job_item_level {
        let player_level = data.player_item_level();
        if i64::from(metadata.item_level) < i64::from(player_level) - i64::from(rule.threshold) {
            let verdict = rule.verdict.outcome();
            diagnostics.note(format!(
                "{} has been set to {verdict} due to its item level being lower than your current job (Your: {player_level} | Item: {}) [Item Level Job]",
                metadata.name, metadata.item_level
            ));
            return Some(verdict);
        }
    }

    if let (Some(rule), Some(slot)) = (config.not_job_upgrade, metadata.equip_slot) {
        let lowest_equipped = data
            .equipped_items_in_slot(slot)
            .into_iter()
            .filter_map(|id| data.resolve_item(id))
            .filter(|equipped| equipped.equip_slot == Some(slot))
            .map(|equipped| equipped.item_level)
            .min();

        if let Some(equipped_level) = lowest_equipped {
            if equipped_level > metadata.item_level {
                let verdict = rule.verdict.outcome();
                diagnostics.note(format!(
                    "{} has been set to {verdict} due to its item level being lower than your equipped item (Item: {} | Yours: {equipped_level}) [Not An Upgrade]",
                    metadata.name, metadata.item_level
                ));
                return Some(verdict);
            }
        }
    }

    None
}
