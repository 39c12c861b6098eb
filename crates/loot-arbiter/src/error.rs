use std::io;
use std::path::{Path, PathBuf};

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Failures a host binary can hit before or around the engine. The engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("unable to read scenario '{}': {source}", path.display())]
    ReadScenario {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("scenario '{}' is not valid: {source}", path.display())]
    ParseScenario {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render decision trace: {0}")]
    RenderTrace(#[source] serde_json::Error),
}

impl AppError {
    pub fn read_scenario(path: &Path, source: io::Error) -> Self {
        Self::ReadScenario {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse_scenario(path: &Path, source: serde_json::Error) -> Self {
        Self::ParseScenario {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Scenario file the error refers to, if any.
    pub fn scenario_path(&self) -> Option<&Path> {
        match self {
            AppError::ReadScenario { path, .. } | AppError::ParseScenario { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}
