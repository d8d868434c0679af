//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (pickup insertion order)
//! - No rendering or platform dependencies; output is a draw list

pub mod state;
pub mod tick;

pub use state::{EnergyPickup, GameState, GameStats, PickupId, PickupPool, Ship};
pub use tick::{ThrustOutcome, TickInput, tick};
