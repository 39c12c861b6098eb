use std::fmt;

use serde::Serialize;

use super::super::domain::{DutyId, RestrictionRule, RollOutcome, RuleTarget};
use super::super::host::GameData;
use super::diagnostics::Diagnostics;
use super::unlocks::ResolvedItem;

/// Where an override verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideSource {
    None,
    Item,
    Duty,
    /// Forced by the engine for unresolvable or already-held unique items.
    System,
}

impl fmt::Display for OverrideSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OverrideSource::None => "none",
            OverrideSource::Item => "item",
            OverrideSource::Duty => "duty",
            OverrideSource::System => "system",
        };
        f.write_str(label)
    }
}

/// Result of the custom override lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomRule {
    pub verdict: Option<RollOutcome>,
    pub source: OverrideSource,
}

impl CustomRule {
    pub fn none() -> Self {
        Self {
            verdict: None,
            source: OverrideSource::None,
        }
    }

    /// A "do nothing" override removes the entry from consideration.
    pub fn skips_entry(&self) -> bool {
        self.verdict == Some(RollOutcome::DoNothing)
    }

    pub fn is_item_scoped(&self) -> bool {
        self.source == OverrideSource::Item && self.verdict.is_some()
    }
}

pub(crate) fn lookup<G>(
    data: &G,
    rules: &[RestrictionRule],
    item: &ResolvedItem,
    scope: Option<DutyId>,
    diagnostics: &mut Diagnostics,
) -> CustomRule
where
    G: GameData + ?Sized,
{
    let forced_pass = match &item.metadata {
        None => true,
        Some(metadata) => metadata.unique && data.inventory_count(item.id) > 0,
    };
    if forced_pass {
        return CustomRule {
            verdict: Some(RollOutcome::Passed),
            source: OverrideSource::System,
        };
    }

    if let Some(rule) = find_enabled(rules, RuleTarget::Item(item.id)) {
        diagnostics.note(format!(
            "{} is {}. [Item Custom Restriction]",
            item.name(),
            action(rule.verdict)
        ));
        return CustomRule {
            verdict: Some(rule.verdict),
            source: OverrideSource::Item,
        };
    }

    let Some(scope) = scope.filter(|scope| scope.0 != 0) else {
        return CustomRule::none();
    };

    if let Some(rule) = find_enabled(rules, RuleTarget::Duty(scope)) {
        diagnostics.note(format!(
            "{} is {} due to being in duty {scope}. [Duty Custom Restriction]",
            item.name(),
            action(rule.verdict)
        ));
        return CustomRule {
            verdict: Some(rule.verdict),
            source: OverrideSource::Duty,
        };
    }

    CustomRule::none()
}

fn find_enabled(rules: &[RestrictionRule], target: RuleTarget) -> Option<&RestrictionRule> {
    rules
        .iter()
        .find(|rule| rule.enabled && rule.target == target)
}

fn action(verdict: RollOutcome) -> &'static str {
    match verdict {
        RollOutcome::Needed => "needing",
        RollOutcome::Greeded => "greeding",
        RollOutcome::Passed => "passing",
        RollOutcome::DoNothing => "ignored",
    }
}
