use super::super::domain::RollOutcome;

/// Returns whichever outcome is more restrictive. `DoNothing` never wins.
pub fn more_restrictive(left: RollOutcome, right: RollOutcome) -> RollOutcome {
    if right.restrictiveness() > left.restrictiveness() {
        right
    } else {
        left
    }
}

/// Merges base intent, override, and restriction verdict under the game's ceiling.
///
/// An override bypasses the restriction verdict but is still clamped by
/// `max_allowed`; without one the restriction verdict replaces the base intent
/// unless it is `DoNothing`.
pub fn resolve(
    base_intent: RollOutcome,
    max_allowed: RollOutcome,
    override_verdict: Option<RollOutcome>,
    player_restriction: RollOutcome,
) -> RollOutcome {
    if let Some(verdict) = override_verdict {
        return more_restrictive(verdict, max_allowed);
    }

    let desired = if player_restriction == RollOutcome::DoNothing {
        base_intent
    } else {
        player_restriction
    };
    more_restrictive(desired, max_allowed)
}
