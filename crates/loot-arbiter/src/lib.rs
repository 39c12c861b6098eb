//! Loot-roll decision engine.
//!
//! Given a loot window snapshot, the player's state, and a user settings
//! snapshot, the engine picks one need/greed/pass outcome per entry, paces
//! submissions, and tracks the weekly lockout latch for the current duty.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
