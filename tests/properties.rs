//! Property tests for ship physics and the pickup pool

use glam::Vec2;
use proptest::prelude::*;

use starfuel::sim::{GameState, Ship, TickInput, tick};
use starfuel::{DrawQueue, Tuning};

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(rotate_left, rotate_right, thrust_forward, thrust_reverse, brake)| TickInput {
            rotate_left,
            rotate_right,
            thrust_forward,
            thrust_reverse,
            brake,
        },
    )
}

proptest! {
    #[test]
    fn velocity_stays_capped(
        vx in -50.0f32..50.0,
        vy in -50.0f32..50.0,
        inputs in prop::collection::vec(arb_input(), 1..200),
    ) {
        let tuning = Tuning::default();
        let mut ship = Ship::new(&tuning);
        ship.velocity = Vec2::new(vx, vy);
        ship.energy = 1.0;

        for input in &inputs {
            ship.tick(input, &tuning);
            prop_assert!(ship.velocity.x.abs() <= tuning.max_speed);
            prop_assert!(ship.velocity.y.abs() <= tuning.max_speed);
        }
    }

    #[test]
    fn location_stays_on_field(
        x in 0.0f32..=1280.0,
        y in 0.0f32..=720.0,
        vx in -10.0f32..=10.0,
        vy in -10.0f32..=10.0,
        inputs in prop::collection::vec(arb_input(), 1..200),
    ) {
        let tuning = Tuning::default();
        let mut ship = Ship::new(&tuning);
        ship.location = Vec2::new(x, y);
        ship.velocity = Vec2::new(vx, vy);

        for input in &inputs {
            ship.tick(input, &tuning);
            prop_assert!((0.0..=1280.0).contains(&ship.location.x));
            prop_assert!((0.0..=720.0).contains(&ship.location.y));
        }
    }

    #[test]
    fn thrust_needs_energy_above_threshold(
        energy in 0.0f32..0.0001,
        rotation in -360.0f32..360.0,
    ) {
        let tuning = Tuning::default();
        let mut ship = Ship::new(&tuning);
        ship.energy = energy;
        ship.rotation = rotation;
        let input = TickInput { thrust_forward: true, ..Default::default() };

        let outcome = ship.tick(&input, &tuning);
        prop_assert!(!outcome.applied);
        prop_assert_eq!(ship.velocity, Vec2::ZERO);
        prop_assert_eq!(ship.energy, energy);
    }

    #[test]
    fn energy_never_drops_below_floor(
        energy in 0.0f32..0.01,
        ticks in 1usize..100,
    ) {
        let tuning = Tuning::default();
        let mut ship = Ship::new(&tuning);
        ship.energy = energy;
        let input = TickInput { thrust_forward: true, rotate_left: true, ..Default::default() };

        for _ in 0..ticks {
            ship.tick(&input, &tuning);
            prop_assert!(ship.energy >= tuning.min_energy);
        }
    }

    #[test]
    fn pool_never_exceeds_target(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..300),
    ) {
        let mut state = GameState::new(seed);
        let mut queue = DrawQueue::new();
        for input in &inputs {
            let before = state.pickups.len();
            tick(&mut state, input, &mut queue);
            prop_assert!(state.pickups.len() <= state.tuning.pickup_target);
            // At most one spawn per tick
            prop_assert!(state.pickups.len() <= before + 1);
            prop_assert!(state.ship.energy <= state.tuning.max_energy + 1e-5);
        }
    }
}
