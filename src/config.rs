//! Simulator configuration loaded from `~/.sketchtty/config.yaml` or `--config`.

use crate::board::peripherals::{Peripheral, PeripheralKind, PeripheralRegistry};
use crate::interpreter::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_TICK_MS};
use crate::parser::ast::PinId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("tick_ms must be between 1 and 1000, got {0}")]
    InvalidTick(u64),
}

/// Pin reference as written in YAML: a number or a name such as `A0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PinSpec {
    Number(i64),
    Named(String),
}

impl From<&PinSpec> for PinId {
    fn from(spec: &PinSpec) -> Self {
        match spec {
            PinSpec::Number(n) => PinId::Number(*n),
            PinSpec::Named(name) => PinId::Named(name.clone()),
        }
    }
}

/// One peripheral to bind at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeripheralSpec {
    pub id: String,
    pub kind: PeripheralKind,
    pub pin: PinSpec,
    #[serde(default)]
    pub position: (u16, u16),
}

/// Simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Scheduler period in milliseconds.
    #[serde(default = "SimConfig::default_tick_ms")]
    pub tick_ms: u64,
    /// Peripherals bound when the session is created.
    #[serde(default = "SimConfig::default_peripherals")]
    pub peripherals: Vec<PeripheralSpec>,
    /// Prefix serial monitor lines with their simulated time.
    #[serde(default = "SimConfig::default_true")]
    pub serial_timestamps: bool,
    /// Memory budget for step history in bytes. 0 disables history.
    #[serde(default = "SimConfig::default_history_limit")]
    pub history_limit: usize,
}

impl SimConfig {
    /// Load from the standard path (~/.sketchtty/config.yaml).
    /// Returns None if the file doesn't exist or can't be parsed.
    pub fn load() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load_from(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file");
                None
            }
        }
    }

    /// Load and validate an explicit config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sketchtty").join("config.yaml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.tick_ms) {
            return Err(ConfigError::InvalidTick(self.tick_ms));
        }
        Ok(())
    }

    /// Registry holding the configured peripherals.
    pub fn peripheral_registry(&self) -> PeripheralRegistry {
        let mut registry = PeripheralRegistry::new();
        for spec in &self.peripherals {
            registry.add(Peripheral {
                id: spec.id.clone(),
                kind: spec.kind,
                pin: PinId::from(&spec.pin),
                position: spec.position,
            });
        }
        registry
    }

    fn default_tick_ms() -> u64 {
        DEFAULT_TICK_MS
    }

    fn default_true() -> bool {
        true
    }

    fn default_history_limit() -> usize {
        DEFAULT_HISTORY_LIMIT
    }

    /// Default board: the built-in LED on 13 plus a green LED on 12.
    fn default_peripherals() -> Vec<PeripheralSpec> {
        vec![
            PeripheralSpec {
                id: "led-builtin".to_string(),
                kind: PeripheralKind::RedLed,
                pin: PinSpec::Number(13),
                position: (0, 0),
            },
            PeripheralSpec {
                id: "led-green".to_string(),
                kind: PeripheralKind::GreenLed,
                pin: PinSpec::Number(12),
                position: (1, 0),
            },
        ]
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: Self::default_tick_ms(),
            peripherals: Self::default_peripherals(),
            serial_timestamps: true,
            history_limit: Self::default_history_limit(),
        }
    }
}
