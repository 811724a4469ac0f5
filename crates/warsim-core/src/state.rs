//! World state snapshot: the complete authoritative state after a tick.

use serde::{Deserialize, Serialize};

use crate::components::{is_hostile, Faction, Projectile, Unit};
use crate::types::{FactionId, UnitId};

/// Immutable aggregate of everything the simulation knows.
///
/// Shared as `Arc<WorldState>`; a published instance is never mutated.
/// Writers build a new value and swap it in through the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub units: Vec<Unit>,
    pub projectiles: Vec<Projectile>,
    pub factions: Vec<Faction>,
    pub tick: u64,
}

impl WorldState {
    pub fn new(
        units: Vec<Unit>,
        projectiles: Vec<Projectile>,
        factions: Vec<Faction>,
        tick: u64,
    ) -> Self {
        Self {
            units,
            projectiles,
            factions,
            tick,
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.iter().find(|faction| faction.id == id)
    }

    /// Directed hostility from `from`'s perspective.
    pub fn is_hostile(&self, from: FactionId, to: FactionId) -> bool {
        is_hostile(&self.factions, from, to)
    }

    /// Live units that `observer` considers hostile within `range_m`, in
    /// snapshot order, paired with their distance.
    pub fn hostiles_within(
        &self,
        observer: &Unit,
        range_m: f64,
    ) -> impl Iterator<Item = (&Unit, f64)> + '_ {
        let (observer_id, faction, origin) = (observer.id, observer.faction, observer.position);
        self.units
            .iter()
            .filter(move |other| {
                other.id != observer_id
                    && !other.is_destroyed()
                    && self.is_hostile(faction, other.faction)
            })
            .map(move |other| (other, origin.distance_to(&other.position)))
            .filter(move |(_, distance)| *distance <= range_m)
    }

    /// Nearest live hostile within `range_m`. Ties keep the first found.
    pub fn nearest_hostile(&self, observer: &Unit, range_m: f64) -> Option<(&Unit, f64)> {
        self.hostiles_within(observer, range_m)
            .fold(None, |best: Option<(&Unit, f64)>, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            })
    }
}
