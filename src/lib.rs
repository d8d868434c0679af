//! Starfuel - a wrap-around arcade ship game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship physics, pickups, game state)
//! - `draw`: Per-tick draw list handed to the host renderer
//! - `tuning`: Data-driven game balance

pub mod draw;
pub mod sim;
pub mod tuning;

pub use draw::{DrawCommand, DrawQueue};
pub use sim::{GameState, TickInput, tick};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// A position or velocity on the play field
pub type Point = Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const SCREEN_WIDTH: u32 = 1280;
    pub const SCREEN_HEIGHT: u32 = 720;

    /// Ship defaults
    pub const SHIP_MAX_SPEED: f32 = 10.0;
    pub const SHIP_ACCELERATION: f32 = 0.03;
    pub const SHIP_MAX_ENERGY: f32 = 1.0;
    pub const SHIP_MIN_ENERGY: f32 = 0.0;
    pub const SHIP_START_ENERGY: f32 = 0.5;
    /// Degrees turned per tick while a rotate key is held
    pub const SHIP_TURN_RATE: f32 = 2.0;
    pub const SHIP_SIZE: f32 = 20.0;
    /// Ship art faces up; subtract this to point the nose along `rotation`
    pub const SHIP_SPRITE_ANGLE_OFFSET: f32 = 90.0;

    /// Pickup defaults
    pub const PICKUP_TARGET_COUNT: usize = 10;
    pub const PICKUP_RADIUS: f32 = 20.0;
    pub const PICKUP_ENERGY: f32 = 0.1;
    pub const PICKUP_SIZE: f32 = 20.0;

    /// Energy bar layout
    pub const ENERGY_BAR_X: f32 = 20.0;
    pub const ENERGY_BAR_Y: f32 = 20.0;
    pub const ENERGY_BAR_WIDTH: f32 = 400.0;
    pub const ENERGY_BAR_HEIGHT: f32 = 30.0;
    pub const ENERGY_BAR_MARGIN: f32 = 3.0;

    /// Sprite asset paths
    pub const SHIP_SPRITE: &str = "sprites/misc/lowrez-ship-blue.png";
    pub const PICKUP_SPRITE: &str = "sprites/misc/star.png";
}

/// Point reached by travelling `distance` from `origin` at `angle_degrees`
#[inline]
pub fn point_at_distance_angle(origin: Point, distance: f32, angle_degrees: f32) -> Point {
    let theta = angle_degrees.to_radians();
    origin + Vec2::new(distance * theta.cos(), distance * theta.sin())
}

/// Euclidean distance between two points
#[inline]
pub fn point_distance(a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Componentwise `a - b`
#[inline]
pub fn point_difference(a: Point, b: Point) -> (f32, f32) {
    (a.x - b.x, a.y - b.y)
}
