//! Starfuel headless host
//!
//! Drives the simulation with a simple autopilot, the way a renderer would
//! drive it with keyboard state, then prints the final frame's draw list as
//! JSON on stdout.
//!
//! Usage: `starfuel [TUNING_JSON] [TICKS]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use starfuel::sim::{GameState, TickInput, tick};
    use starfuel::{DrawQueue, Tuning};

    env_logger::init();
    log::info!("Starfuel (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}; using default tuning");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut state = GameState::from_entropy(tuning);
    let mut queue = DrawQueue::new();
    log::info!("Seed {}, running {} ticks", state.seed, ticks);

    for _ in 0..ticks {
        let input: TickInput = autopilot::steer(&state);
        tick(&mut state, &input, &mut queue);
    }

    let stats = &state.stats;
    log::info!(
        "Done: energy {:.3}, {} pickups consumed, {} spawned, {:.3} spent on thrust",
        state.ship.energy,
        stats.pickups_consumed,
        stats.pickups_spawned,
        stats.energy_spent
    );

    match queue.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize draw list: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Embedding hosts call `starfuel::tick` directly
}

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 600;

/// Chases the nearest pickup: turn toward it, thrust when lined up,
/// brake when going too fast
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use starfuel::point_difference;
    use starfuel::sim::{GameState, TickInput};

    const AIM_TOLERANCE: f32 = 3.0;
    const THRUST_CONE: f32 = 30.0;
    const CRUISE_SPEED: f32 = 3.0;
    const BRAKE_SPEED: f32 = 4.0;

    /// Wrap degrees into [-180, 180)
    fn normalize_degrees(mut angle: f32) -> f32 {
        while angle >= 180.0 {
            angle -= 360.0;
        }
        while angle < -180.0 {
            angle += 360.0;
        }
        angle
    }

    pub fn steer(state: &GameState) -> TickInput {
        let ship = &state.ship;
        let speed = ship.velocity.length();

        let target = state
            .pickups
            .iter()
            .map(|(_, p)| point_difference(p.location, ship.location))
            .min_by(|a, b| {
                let da = a.0 * a.0 + a.1 * a.1;
                let db = b.0 * b.0 + b.1 * b.1;
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some((dx, dy)) = target else {
            return TickInput {
                brake: true,
                ..Default::default()
            };
        };

        let bearing = dy.atan2(dx).to_degrees();
        let error = normalize_degrees(bearing - ship.rotation);

        TickInput {
            rotate_left: error > AIM_TOLERANCE,
            rotate_right: error < -AIM_TOLERANCE,
            thrust_forward: error.abs() < THRUST_CONE && speed < CRUISE_SPEED,
            thrust_reverse: false,
            brake: speed > BRAKE_SPEED,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use glam::Vec2;

        #[test]
        fn test_normalize_degrees() {
            assert_eq!(normalize_degrees(190.0), -170.0);
            assert_eq!(normalize_degrees(-190.0), 170.0);
            assert_eq!(normalize_degrees(720.0), 0.0);
        }

        #[test]
        fn test_turns_toward_pickup_above() {
            let mut state = GameState::new(1);
            state.pickups = Default::default();
            let above = state.ship.location + Vec2::new(0.0, 100.0);
            state.spawn_pickup_at(above);

            let input = steer(&state);
            assert!(input.rotate_left);
            assert!(!input.thrust_forward);
        }

        #[test]
        fn test_thrusts_when_aligned() {
            let mut state = GameState::new(1);
            state.pickups = Default::default();
            let ahead = state.ship.location + Vec2::new(100.0, 0.0);
            state.spawn_pickup_at(ahead);

            let input = steer(&state);
            assert!(input.thrust_forward);
            assert!(!input.rotate_left && !input.rotate_right);
        }
    }
}
