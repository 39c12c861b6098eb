use super::super::domain::RollOutcome;
use super::super::host::GameData;
use super::diagnostics::Diagnostics;
use super::policy::more_restrictive;
use super::unlocks::ResolvedItem;
use super::RollContext;

/// Strictest outcome the game itself permits for this entry right now.
///
/// Always concrete. Unresolvable items are capped at a pass.
pub(crate) fn max_allowed<G>(
    data: &G,
    item: &ResolvedItem,
    context: &RollContext,
    diagnostics: &mut Diagnostics,
) -> RollOutcome
where
    G: GameData + ?Sized,
{
    let Some(metadata) = item.metadata.as_ref() else {
        return RollOutcome::Passed;
    };

    let mut state_max = context.ceiling.as_outcome();
    if metadata.unique && (item.is_unlocked(data) || data.inventory_count(item.id) > 0) {
        state_max = RollOutcome::Passed;
    }

    if state_max == RollOutcome::Passed {
        diagnostics.note(format!(
            "{} can only be passed on. [Roll Ceiling]",
            metadata.name
        ));
    }

    more_restrictive(state_max, context.mode.ceiling_outcome())
}
