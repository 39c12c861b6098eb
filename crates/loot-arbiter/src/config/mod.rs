mod engine;

pub use engine::{AutoRollConfig, EngineConfig, RollDelays, MAX_DELAY_SECS};

use std::env;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the host process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    /// Engine settings file; defaults apply when unset.
    pub engine_config_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("LOOT_ARBITER_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("LOOT_ARBITER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        if log_level.trim().is_empty() {
            return Err(ConfigError::EmptyLogLevel);
        }

        let engine_config_path = env::var_os("LOOT_ARBITER_CONFIG")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            engine_config_path,
        })
    }

    /// Loads the engine settings snapshot, or defaults when no file is configured.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        match &self.engine_config_path {
            Some(path) => EngineConfig::from_path(path),
            None => Ok(EngineConfig::default()),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LOOT_ARBITER_LOG_LEVEL must not be empty")]
    EmptyLogLevel,
    #[error("unable to read engine config '{}'", path.display())]
    ReadEngineConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("engine config '{}' is not valid: {source}", path.display())]
    ParseEngineConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
