//! Simulation configuration.
//!
//! Every field has a default matching the stock galaxy, so a partial JSON
//! document only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use stellar_core::constants::*;
use stellar_core::enums::{Owner, ShipClass};
use stellar_core::types::Point;
use stellar_core::world::Treasury;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse config JSON: {source}")]
    Parse {
        source: serde_json::Error,
    },

    /// A field is outside its accepted range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(source: serde_json::Error) -> Self {
        Self::Parse { source }
    }
}

/// An outpost placed at galaxy generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedOutpost {
    pub position: Point,
    pub owner: Owner,
    pub level: u8,
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed and inputs give the same run.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub map_width: f64,
    pub map_height: f64,
    /// Systems to generate, home system included.
    pub system_count: usize,
    /// Speed of dispatched fleets (units per second).
    pub fleet_speed: f64,
    /// AI step interval (ms).
    pub ai_tick_ms: f64,
    pub pirate_respawn_ms: f64,
    pub max_pirates: usize,
    pub max_defenders_per_system: u32,
    pub raid_interval_ms: f64,
    /// Chance per raid interval that an enemy system launches a raid.
    pub raid_chance: f64,
    /// Ships docked at the home system at start.
    pub starting_ships: Vec<ShipClass>,
    pub starting_treasury: Treasury,
    pub seed_outposts: Vec<SeedOutpost>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            system_count: GALAXY_SYSTEM_COUNT,
            fleet_speed: FLEET_SPEED,
            ai_tick_ms: AI_TICK_MS,
            pirate_respawn_ms: PIRATE_RESPAWN_MS,
            max_pirates: MAX_PIRATES,
            max_defenders_per_system: MAX_DEFENDERS_PER_SYSTEM,
            raid_interval_ms: RAID_INTERVAL_MS,
            raid_chance: RAID_CHANCE,
            starting_ships: vec![
                ShipClass::Scout,
                ShipClass::Fighter,
                ShipClass::Fighter,
                ShipClass::Cruiser,
                ShipClass::Colony,
            ],
            starting_treasury: Treasury::default(),
            seed_outposts: vec![
                SeedOutpost {
                    position: Point::new(500.0, 300.0),
                    owner: Owner::Player,
                    level: 1,
                },
                SeedOutpost {
                    position: Point::new(1200.0, 800.0),
                    owner: Owner::Enemy,
                    level: 2,
                },
            ],
        }
    }
}

impl SimConfig {
    /// Load and validate configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        if !(0.0..=4.0).contains(&self.time_scale) {
            return Err(ConfigError::Invalid {
                field: "time_scale",
                reason: format!("must be within [0, 4], got {}", self.time_scale),
            });
        }
        positive("map_width", self.map_width)?;
        positive("map_height", self.map_height)?;
        positive("fleet_speed", self.fleet_speed)?;
        positive("ai_tick_ms", self.ai_tick_ms)?;
        positive("pirate_respawn_ms", self.pirate_respawn_ms)?;
        positive("raid_interval_ms", self.raid_interval_ms)?;

        if !(0.0..=1.0).contains(&self.raid_chance) {
            return Err(ConfigError::Invalid {
                field: "raid_chance",
                reason: format!("must be a probability, got {}", self.raid_chance),
            });
        }
        let capacity =
            (GALAXY_QUADRANTS_H * GALAXY_QUADRANTS_V) as usize * GALAXY_MAX_PER_QUADRANT;
        if self.system_count == 0 || self.system_count > capacity {
            return Err(ConfigError::Invalid {
                field: "system_count",
                reason: format!("must be within [1, {capacity}], got {}", self.system_count),
            });
        }
        if let Some(bad) = self
            .seed_outposts
            .iter()
            .find(|o| !(OUTPOST_MIN_LEVEL..=OUTPOST_MAX_LEVEL).contains(&o.level))
        {
            return Err(ConfigError::Invalid {
                field: "seed_outposts",
                reason: format!("outpost level must be within [1, 3], got {}", bad.level),
            });
        }
        Ok(())
    }
}
