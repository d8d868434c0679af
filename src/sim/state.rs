//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here, including the RNG, so two
//! states built from the same seed stay in lockstep.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::draw::{self, DrawQueue};
use crate::tuning::Tuning;
use crate::{Point, point_distance};

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub location: Point,
    /// Per-tick displacement, capped per axis to `max_speed`
    pub velocity: Vec2,
    /// Degrees, unbounded
    pub rotation: f32,
    pub energy: f32,
}

impl Ship {
    /// Ship at rest in the middle of the field
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            location: Vec2::new(
                (tuning.screen_width / 2) as f32,
                (tuning.screen_height / 2) as f32,
            ),
            velocity: Vec2::ZERO,
            rotation: 0.0,
            energy: tuning.start_energy,
        }
    }

    /// Fraction of the energy bar to fill
    pub fn energy_fraction(&self, tuning: &Tuning) -> f32 {
        self.energy / tuning.max_energy
    }

    pub fn draw(&self, queue: &mut DrawQueue, tuning: &Tuning) {
        draw::ship(queue, self.location, self.rotation);
        draw::energy_bar(queue, self.energy_fraction(tuning));
    }
}

/// A stationary energy refill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyPickup {
    pub location: Point,
}

impl EnergyPickup {
    pub fn new(location: Point) -> Self {
        Self { location }
    }

    /// Spawn at a random whole-pixel location, bounds inclusive
    pub fn random<R: Rng>(rng: &mut R, tuning: &Tuning) -> Self {
        let x = rng.random_range(0..=tuning.screen_width);
        let y = rng.random_range(0..=tuning.screen_height);
        Self::new(Vec2::new(x as f32, y as f32))
    }

    /// Strictly closer than `radius` to `point`
    pub fn is_within(&self, point: Point, radius: f32) -> bool {
        point_distance(self.location, point) < radius
    }

    pub fn draw(&self, queue: &mut DrawQueue) {
        draw::pickup(queue, self.location);
    }
}

/// Stable handle to a pickup slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickupId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    pickup: Option<EnergyPickup>,
}

/// Arena of live pickups
///
/// Slots are reused through a free list; a bumped generation keeps stale
/// ids from resolving to a newer pickup. Iteration follows insertion order,
/// not slot order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "PickupPoolData")]
pub struct PickupPool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<PickupId>,
}

/// Pool fields as stored; repaired into a consistent `PickupPool` on load
#[derive(Deserialize)]
struct PickupPoolData {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<PickupId>,
}

impl From<PickupPoolData> for PickupPool {
    fn from(data: PickupPoolData) -> Self {
        let PickupPoolData { slots, free, order } = data;
        let mut listed = vec![false; slots.len()];

        // Keep ids that resolve to a live slot, each slot once
        let mut order: Vec<PickupId> = order
            .into_iter()
            .filter(|id| {
                let index = id.index as usize;
                let live = slots
                    .get(index)
                    .is_some_and(|slot| slot.generation == id.generation && slot.pickup.is_some());
                if !live || listed[index] {
                    return false;
                }
                listed[index] = true;
                true
            })
            .collect();

        // Live slots missing from the order go last, in slot order
        for (index, slot) in slots.iter().enumerate() {
            if slot.pickup.is_some() && !listed[index] {
                order.push(PickupId {
                    index: index as u32,
                    generation: slot.generation,
                });
            }
        }

        // Only empty slots may be reused, each once
        let mut freed = vec![false; slots.len()];
        let free = free
            .into_iter()
            .filter(|&index| {
                let i = index as usize;
                let empty = slots.get(i).is_some_and(|slot| slot.pickup.is_none());
                if !empty || freed[i] {
                    return false;
                }
                freed[i] = true;
                true
            })
            .collect();

        Self { slots, free, order }
    }
}

impl PickupPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append a pickup; it is visited after every pickup already present
    pub fn insert(&mut self, pickup: EnergyPickup) -> PickupId {
        let reusable = self.free.pop().and_then(|index| {
            self.slots
                .get_mut(index as usize)
                .filter(|slot| slot.pickup.is_none())
                .map(|slot| (index, slot))
        });
        let id = match reusable {
            Some((index, slot)) => {
                slot.pickup = Some(pickup);
                PickupId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    pickup: Some(pickup),
                });
                PickupId {
                    index,
                    generation: 0,
                }
            }
        };
        self.order.push(id);
        id
    }

    pub fn get(&self, id: PickupId) -> Option<&EnergyPickup> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.pickup.as_ref())
    }

    pub fn contains(&self, id: PickupId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> &[PickupId] {
        &self.order
    }

    /// Live pickups in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (PickupId, &EnergyPickup)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.get(id).map(|pickup| (id, pickup)))
    }

    /// Remove a batch of pickups, keeping the order of the survivors
    pub fn remove_all(&mut self, ids: &[PickupId]) -> usize {
        let mut removed = 0;
        for &id in ids {
            let Some(slot) = self.slots.get_mut(id.index as usize) else {
                continue;
            };
            if slot.generation != id.generation || slot.pickup.is_none() {
                continue;
            }
            slot.pickup = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
            removed += 1;
        }
        if removed > 0 {
            let slots = &self.slots;
            self.order.retain(|id| {
                slots
                    .get(id.index as usize)
                    .is_some_and(|slot| slot.generation == id.generation && slot.pickup.is_some())
            });
        }
        removed
    }

    pub fn remove(&mut self, id: PickupId) -> Option<EnergyPickup> {
        let pickup = self.get(id).cloned()?;
        self.remove_all(&[id]);
        Some(pickup)
    }
}

/// Session counters (not gameplay-affecting)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub pickups_consumed: u64,
    pub pickups_spawned: u64,
    /// Energy drained by thrust
    pub energy_spent: f32,
    /// Energy gained from pickups
    pub energy_collected: f32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    pub pickups: PickupPool,
    pub stats: GameStats,
    rng: Pcg32,
}

impl GameState {
    /// New game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    /// New game seeded from the thread RNG
    pub fn from_entropy(tuning: Tuning) -> Self {
        Self::with_tuning(tuning, rand::random())
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        let mut state = Self {
            seed,
            ship: Ship::new(&tuning),
            tuning,
            time_ticks: 0,
            pickups: PickupPool::new(),
            stats: GameStats::default(),
            rng: Pcg32::seed_from_u64(seed),
        };

        for _ in 0..state.tuning.pickup_target {
            state.spawn_pickup();
        }

        state
    }

    /// Add one pickup at a random location
    pub fn spawn_pickup(&mut self) -> PickupId {
        let pickup = EnergyPickup::random(&mut self.rng, &self.tuning);
        log::debug!(
            "Spawned pickup at ({}, {})",
            pickup.location.x,
            pickup.location.y
        );
        self.stats.pickups_spawned += 1;
        self.pickups.insert(pickup)
    }

    /// Add one pickup at a fixed location (scripted setups and tests)
    pub fn spawn_pickup_at(&mut self, location: Point) -> PickupId {
        self.stats.pickups_spawned += 1;
        self.pickups.insert(EnergyPickup::new(location))
    }
}
