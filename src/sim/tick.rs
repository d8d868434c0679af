//! Fixed-rate simulation tick
//!
//! The host calls `tick` once per frame. There is no dt: one call moves
//! the ship by exactly one velocity step.

use glam::Vec2;

use super::state::{GameState, Ship};
use crate::draw::DrawQueue;
use crate::point_at_distance_angle;
use crate::tuning::Tuning;

/// Controls held during a single tick
///
/// Anything the host cannot report is treated as not held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Turn counter-clockwise (+rotation)
    pub rotate_left: bool,
    /// Turn clockwise (-rotation)
    pub rotate_right: bool,
    pub thrust_forward: bool,
    /// Thrust against the nose direction
    pub thrust_reverse: bool,
    pub brake: bool,
}

/// What thrust did to the ship this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrustOutcome {
    /// At least one velocity axis changed
    pub applied: bool,
    /// Energy actually removed (less than the full cost when the floor clamps)
    pub energy_spent: f32,
}

impl Ship {
    /// Advance physics by one tick: input, speed clamp, move, wrap
    pub fn tick(&mut self, input: &TickInput, tuning: &Tuning) -> ThrustOutcome {
        let outcome = self.apply_input(input, tuning);

        self.velocity = self
            .velocity
            .clamp(Vec2::splat(-tuning.max_speed), Vec2::splat(tuning.max_speed));

        self.location += self.velocity;
        self.screen_wrap(tuning);

        outcome
    }

    fn apply_input(&mut self, input: &TickInput, tuning: &Tuning) -> ThrustOutcome {
        // Thrust direction uses the heading from before this tick's turn
        let mut accel = point_at_distance_angle(Vec2::ZERO, tuning.acceleration, self.rotation);

        if input.rotate_left {
            self.rotation += tuning.turn_rate;
        }
        if input.rotate_right {
            self.rotation -= tuning.turn_rate;
        }

        if input.thrust_reverse {
            accel = -accel;
        }

        let mut outcome = ThrustOutcome::default();
        if input.thrust_forward || input.thrust_reverse {
            outcome = self.thrust(accel, tuning);
        }

        if input.brake {
            let step = tuning.brake_step();
            self.velocity.x = brake_axis(self.velocity.x, step);
            self.velocity.y = brake_axis(self.velocity.y, step);
        }

        outcome
    }

    /// Apply `accel` per axis where it keeps the axis under the cap
    ///
    /// Costs a flat `thrust_cost` once if either axis changed.
    fn thrust(&mut self, accel: Vec2, tuning: &Tuning) -> ThrustOutcome {
        let can_burn = self.energy > tuning.thrust_threshold();
        let max = tuning.max_speed;
        let mut applied = false;

        let new_x = self.velocity.x + accel.x;
        if can_burn && (-max..=max).contains(&new_x) {
            self.velocity.x = new_x;
            applied = true;
        }
        let new_y = self.velocity.y + accel.y;
        if can_burn && (-max..=max).contains(&new_y) {
            self.velocity.y = new_y;
            applied = true;
        }

        if !applied {
            return ThrustOutcome::default();
        }

        let before = self.energy;
        self.energy -= tuning.thrust_cost();
        if tuning.clamp_energy_floor {
            self.energy = self.energy.max(tuning.min_energy);
        }
        ThrustOutcome {
            applied,
            energy_spent: before - self.energy,
        }
    }

    /// Wrap to the opposite edge once strictly past it
    fn screen_wrap(&mut self, tuning: &Tuning) {
        let width = tuning.screen_width as f32;
        let height = tuning.screen_height as f32;

        if self.location.x > width {
            self.location.x = 0.0;
        }
        if self.location.x < 0.0 {
            self.location.x = width;
        }
        if self.location.y > height {
            self.location.y = 0.0;
        }
        if self.location.y < 0.0 {
            self.location.y = height;
        }
    }
}

/// One braking step for a single velocity axis
///
/// Moves toward zero by `step`, then snaps to zero if strictly inside
/// `(-step, step)`. A speed of exactly `step` is left alone.
fn brake_axis(v: f32, step: f32) -> f32 {
    let mut v = v;
    if v > step {
        v -= step;
    }
    if v < -step {
        v += step;
    }
    if v > -step && v < step {
        v = 0.0;
    }
    v
}

/// Advance the game by one frame and fill `queue` with its draw list
pub fn tick(state: &mut GameState, input: &TickInput, queue: &mut DrawQueue) {
    queue.clear();
    state.time_ticks += 1;

    let thrust = state.ship.tick(input, &state.tuning);
    state.stats.energy_spent += thrust.energy_spent;
    state.ship.draw(queue, &state.tuning);

    // Scan a snapshot of ids, remove afterwards so no pickup is skipped
    let ship_location = state.ship.location;
    let ceiling = state.tuning.refuel_ceiling();
    let mut consumed = Vec::new();
    for (id, pickup) in state.pickups.iter() {
        if pickup.is_within(ship_location, state.tuning.pickup_radius)
            && state.ship.energy < ceiling
        {
            state.ship.energy += state.tuning.pickup_energy;
            state.stats.energy_collected += state.tuning.pickup_energy;
            consumed.push(id);
        }
    }
    if !consumed.is_empty() {
        let removed = state.pickups.remove_all(&consumed);
        state.stats.pickups_consumed += removed as u64;
        log::debug!(
            "Tick {}: consumed {} pickup(s), energy now {:.3}",
            state.time_ticks,
            removed,
            state.ship.energy
        );
    }

    for (_, pickup) in state.pickups.iter() {
        pickup.draw(queue);
    }

    if state.pickups.len() < state.tuning.pickup_target {
        state.spawn_pickup();
    }
}
