//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters for the mission and corridor engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Distance at which the ambulance is considered to have reached the
    /// accident scene (meters).
    pub scene_arrival_threshold_m: f64,
    /// Distance at which the ambulance is considered to have reached the
    /// assigned hospital (meters).
    pub hospital_arrival_threshold_m: f64,
    /// Half-width of the corridor around the route segment; signals within
    /// this distance are overridden (meters).
    pub corridor_radius_m: f64,
    /// How long a green override stays claimed without a refresh (milliseconds).
    pub override_ttl_ms: u64,
    /// Suggested cadence for the expiry sweep (milliseconds). Advisory only:
    /// expired overrides also revert lazily on read.
    pub sweep_interval_ms: u64,
    /// Pre-populate the hospital and signal stores with demo fixtures.
    pub seed_demo_data: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scene_arrival_threshold_m: 150.0,
            hospital_arrival_threshold_m: 150.0,
            corridor_radius_m: 250.0,
            override_ttl_ms: 10 * 60 * 1000,
            sweep_interval_ms: 30 * 1000,
            seed_demo_data: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
