//! System configuration - root configuration structure.

use serde::Deserialize;

use super::motor::MotorConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SystemConfig {
    /// Motor limits and speeds.
    #[serde(default)]
    pub motor: MotorConfig,

    /// How often the position is offered to the persistence collaborator.
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// How often status snapshots are published.
    #[serde(default)]
    pub status: StatusConfig,
}

/// Position persistence cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Minimum time between two periodic saves, in milliseconds.
    pub save_interval_ms: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_interval_ms: 5000,
        }
    }
}

/// Status publishing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Interval between status snapshots pushed to clients, in milliseconds.
    pub update_interval_ms: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 100,
        }
    }
}
