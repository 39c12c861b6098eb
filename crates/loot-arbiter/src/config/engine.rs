use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::workflows::loot::{RestrictionConfig, RestrictionRule, RollIntent};

const DEFAULT_MANUAL_MIN_SECS: f32 = 0.5;
const DEFAULT_MANUAL_MAX_SECS: f32 = 1.0;
const DEFAULT_AUTO_MIN_SECS: f32 = 1.5;
const DEFAULT_AUTO_MAX_SECS: f32 = 3.0;

/// Longest delay either jitter window may ask for.
pub const MAX_DELAY_SECS: f32 = 60.0;

/// Read-only settings snapshot handed to the engine on every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub auto_roll: AutoRollConfig,
    pub delays: RollDelays,
    pub restrictions: RestrictionConfig,
    /// Opt out of demoting repeated attempts on the same slot to a pass.
    pub never_emergency_pass: bool,
    pub rules: Vec<RestrictionRule>,
}

impl EngineConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadEngineConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::ParseEngineConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clamps values that the settings editor may have left inconsistent.
    pub fn sanitized(mut self) -> Self {
        self.delays = self.delays.sanitized();
        self
    }
}

/// Unattended rolling mode. Disabled means the "off" intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoRollConfig {
    pub enabled: bool,
    pub intent: RollIntent,
}

impl Default for AutoRollConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            intent: RollIntent::Need,
        }
    }
}

/// Jitter windows between successive roll submissions, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollDelays {
    pub manual_min_secs: f32,
    pub manual_max_secs: f32,
    pub auto_min_secs: f32,
    pub auto_max_secs: f32,
}

impl Default for RollDelays {
    fn default() -> Self {
        Self {
            manual_min_secs: DEFAULT_MANUAL_MIN_SECS,
            manual_max_secs: DEFAULT_MANUAL_MAX_SECS,
            auto_min_secs: DEFAULT_AUTO_MIN_SECS,
            auto_max_secs: DEFAULT_AUTO_MAX_SECS,
        }
    }
}

impl RollDelays {
    pub fn sanitized(self) -> Self {
        let (manual_min_secs, manual_max_secs) = clamp_window(
            self.manual_min_secs,
            self.manual_max_secs,
            DEFAULT_MANUAL_MIN_SECS,
            DEFAULT_MANUAL_MAX_SECS,
        );
        let (auto_min_secs, auto_max_secs) = clamp_window(
            self.auto_min_secs,
            self.auto_max_secs,
            DEFAULT_AUTO_MIN_SECS,
            DEFAULT_AUTO_MAX_SECS,
        );

        Self {
            manual_min_secs,
            manual_max_secs,
            auto_min_secs,
            auto_max_secs,
        }
    }
}

fn clamp_window(min: f32, max: f32, default_min: f32, default_max: f32) -> (f32, f32) {
    let min = if min.is_finite() && min >= 0.0 {
        min.min(MAX_DELAY_SECS)
    } else {
        default_min
    };
    let max = if max.is_finite() && max >= 0.0 {
        max.min(MAX_DELAY_SECS)
    } else {
        default_max
    };
    (min, max.max(min))
}
