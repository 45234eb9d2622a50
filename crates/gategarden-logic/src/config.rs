//! Tunable game rules.
//!
//! The defaults reproduce the shipped game: 75 on every meter, ten days
//! of two visitors each, the 60/25/12/3 rarity split and the event gates.
//! A config can be loaded from JSON; missing fields take their defaults.
//!
//! ```
//! use gategarden_logic::config::{validate_config, GardenConfig};
//!
//! let mut config = GardenConfig::default();
//! config.max_days = 7;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{GardenError, Result};
use crate::meters::{INITIAL_METER, METER_MAX};
use crate::visitors::RarityWeights;

/// Default number of days in a reign.
pub const MAX_DAYS: u32 = 10;

/// Default number of visitors judged per day.
pub const MAX_VISITORS_PER_DAY: u32 = 2;

/// Chance that an event fires on its own trigger day.
pub const EVENT_TRIGGER_CHANCE: f64 = 0.7;

/// Chance that the event subsystem intervenes on an ordinary day.
pub const EVENT_BASE_CHANCE: f64 = 0.3;

/// Events never intervene on or before this day.
pub const EVENT_QUIET_DAYS: u32 = 2;

/// Medals needed to open the gate.
pub const GATE_THRESHOLD: u8 = 2;

/// Most medals a player can hold.
pub const MEDAL_CAP: u8 = 3;

/// Game rules for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Starting value of every meter.
    pub initial_meter: u8,
    /// Last day of the reign; the ending is classified after it.
    pub max_days: u32,
    /// Visitors resolved before the day is complete.
    pub max_visitors_per_day: u32,
    /// Relative weights of the four rarity tiers.
    pub rarity_weights: RarityWeights,
    /// Probability gate for an event on its trigger day.
    pub event_trigger_chance: f64,
    /// Probability the event subsystem intervenes on a day with no eligible event.
    pub event_base_chance: f64,
    /// Days 1..=quiet_days never see events.
    pub event_quiet_days: u32,
    /// Medals required to open the gate.
    pub gate_threshold: u8,
    /// Medal counter cap.
    pub medal_cap: u8,
    /// Whether the external text source is consulted at all.
    pub oracle_enabled: bool,
    /// Seed for the session RNG (`None` = caller decides).
    pub seed: Option<u64>,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            initial_meter: INITIAL_METER,
            max_days: MAX_DAYS,
            max_visitors_per_day: MAX_VISITORS_PER_DAY,
            rarity_weights: RarityWeights::default(),
            event_trigger_chance: EVENT_TRIGGER_CHANCE,
            event_base_chance: EVENT_BASE_CHANCE,
            event_quiet_days: EVENT_QUIET_DAYS,
            gate_threshold: GATE_THRESHOLD,
            medal_cap: MEDAL_CAP,
            oracle_enabled: false,
            seed: None,
        }
    }
}

impl GardenConfig {
    /// Parse a JSON rule file and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GardenConfig = serde_json::from_str(json)?;
        let errors = validate_config(&config);
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(GardenError::InvalidConfig(errors))
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial_meter must be within 1..=100, got {0}")]
    InitialMeterOutOfRange(u8),
    #[error("max_days must be at least 1")]
    ZeroMaxDays,
    #[error("max_visitors_per_day must be at least 1")]
    ZeroVisitorsPerDay,
    #[error("rarity weights sum to zero")]
    ZeroRarityWeights,
    #[error("{name} must be a probability within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("gate_threshold {threshold} exceeds medal_cap {cap}")]
    GateUnreachable { threshold: u8, cap: u8 },
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &GardenConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.initial_meter == 0 || config.initial_meter > METER_MAX {
        errors.push(ConfigError::InitialMeterOutOfRange(config.initial_meter));
    }
    if config.max_days == 0 {
        errors.push(ConfigError::ZeroMaxDays);
    }
    if config.max_visitors_per_day == 0 {
        errors.push(ConfigError::ZeroVisitorsPerDay);
    }
    if config.rarity_weights.total() == 0 {
        errors.push(ConfigError::ZeroRarityWeights);
    }
    for (name, value) in [
        ("event_trigger_chance", config.event_trigger_chance),
        ("event_base_chance", config.event_base_chance),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::InvalidProbability { name, value });
        }
    }
    if config.gate_threshold > config.medal_cap {
        errors.push(ConfigError::GateUnreachable {
            threshold: config.gate_threshold,
            cap: config.medal_cap,
        });
    }

    errors
}
