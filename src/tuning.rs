//! Data-driven game balance
//!
//! Loaded from JSON by the host; any field left out keeps its default.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning file can be rejected
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub screen_width: u32,
    pub screen_height: u32,

    // === Ship ===
    /// Per-axis speed cap (pixels per tick)
    pub max_speed: f32,
    /// Thrust added per tick; also sets fuel cost and brake strength
    pub acceleration: f32,
    pub max_energy: f32,
    pub min_energy: f32,
    pub start_energy: f32,
    /// Degrees per tick
    pub turn_rate: f32,
    /// Keep thrust from draining energy below `min_energy`
    pub clamp_energy_floor: bool,

    // === Pickups ===
    /// Pool size the game regrows toward, one spawn per tick
    pub pickup_target: usize,
    /// Consumption distance (strict `<`)
    pub pickup_radius: f32,
    pub pickup_energy: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            max_speed: SHIP_MAX_SPEED,
            acceleration: SHIP_ACCELERATION,
            max_energy: SHIP_MAX_ENERGY,
            min_energy: SHIP_MIN_ENERGY,
            start_energy: SHIP_START_ENERGY,
            turn_rate: SHIP_TURN_RATE,
            clamp_energy_floor: true,

            pickup_target: PICKUP_TARGET_COUNT,
            pickup_radius: PICKUP_RADIUS,
            pickup_energy: PICKUP_ENERGY,
        }
    }
}

impl Tuning {
    /// Minimum energy required before thrust is allowed
    pub fn thrust_threshold(&self) -> f32 {
        self.acceleration / 200.0
    }

    /// Energy deducted on a tick where thrust changed velocity
    pub fn thrust_cost(&self) -> f32 {
        self.acceleration / 100.0
    }

    /// Per-tick speed reduction while braking
    pub fn brake_step(&self) -> f32 {
        self.acceleration * 2.0
    }

    /// Pickups are only consumed while energy is strictly below this
    pub fn refuel_ceiling(&self) -> f32 {
        self.max_energy - self.pickup_energy
    }

    /// Check the values can drive a simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.screen_width == 0 {
            return invalid("screen_width", "must be positive");
        }
        if self.screen_height == 0 {
            return invalid("screen_height", "must be positive");
        }
        if !(self.max_speed > 0.0) {
            return invalid("max_speed", "must be positive");
        }
        if !(self.acceleration > 0.0) {
            return invalid("acceleration", "must be positive");
        }
        if !(self.max_energy > self.min_energy) {
            return invalid("max_energy", "must exceed min_energy");
        }
        if self.pickup_target == 0 {
            return invalid("pickup_target", "must be at least 1");
        }
        if !(self.pickup_radius > 0.0) {
            return invalid("pickup_radius", "must be positive");
        }
        Ok(())
    }

    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a starter file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
