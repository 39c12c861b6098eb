use serde::Serialize;
use tracing::info;

use super::domain::DutyId;
use super::host::{ItemCatalog, SystemNotice};

/// Weekly reward lockout latch for the current duty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "scope", rename_all = "snake_case")]
pub enum LockoutState {
    #[default]
    Inactive,
    Active(DutyId),
}

/// Suspends the roll loop after the game reports the weekly cap for a duty.
#[derive(Debug, Clone, Default)]
pub struct WeeklyLockout {
    state: LockoutState,
}

impl WeeklyLockout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a previously observed state, e.g. after the host reloads.
    pub fn restore(state: LockoutState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> LockoutState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, LockoutState::Active(_))
    }

    pub fn clear(&mut self) {
        self.state = LockoutState::Inactive;
    }

    /// Feeds one system message into the latch. Returns true when it transitioned to active.
    pub fn observe_system_message<C>(
        &mut self,
        catalog: &C,
        opted_in: bool,
        scope: Option<DutyId>,
        message: &str,
    ) -> bool
    where
        C: ItemCatalog + ?Sized,
    {
        if !opted_in || self.is_active() {
            return false;
        }

        let Some(scope) = scope.filter(|scope| catalog.scope_qualifies_for_weekly_lockout(*scope))
        else {
            self.clear();
            return false;
        };

        let Some(notice) = catalog.system_notice(SystemNotice::WeeklyLockoutReached) else {
            return false;
        };
        if message.trim() != notice.trim() {
            return false;
        }

        info!(duty = %scope, "weekly lockout reached, suspending rolls");
        self.state = LockoutState::Active(scope);
        true
    }

    /// Re-evaluates the latch after the player moves to a new scope.
    pub fn on_scope_changed<C>(&mut self, catalog: &C, scope: Option<DutyId>)
    where
        C: ItemCatalog + ?Sized,
    {
        let LockoutState::Active(active) = self.state else {
            return;
        };

        let still_locked = scope
            .map(|scope| scope == active && catalog.scope_qualifies_for_weekly_lockout(scope))
            .unwrap_or(false);
        if !still_locked {
            info!(duty = %active, "left weekly lockout duty, resuming rolls");
            self.clear();
        }
    }
}
