//! Entity records: units, projectiles, factions and weapon slots.
//!
//! Entities are plain data. Published copies live inside an immutable
//! `WorldState`; the engine only ever mutates private clones.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_VISION_RANGE_M, KNOTS_TO_MPS, MAX_HEALTH};
use crate::enums::{ProjectileKind, UnitCategory, UnitStatus};
use crate::types::{FactionId, GeoPosition, ProjectileId, UnitId};

/// Category-specific payload of a unit.
///
/// Each variant carries exactly one speed representation (or none for
/// structures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UnitKind {
    Aircraft {
        airspeed_mps: Option<f64>,
        max_altitude_m: Option<f64>,
        capacity: Option<u32>,
    },
    Helicopter {
        airspeed_mps: Option<f64>,
    },
    Vehicle {
        ground_speed_mps: Option<f64>,
        crew: Option<u32>,
    },
    Infantry {
        ground_speed_mps: Option<f64>,
        strength: Option<u32>,
    },
    Ship {
        speed_knots: Option<f64>,
        crew: Option<u32>,
    },
    Structure,
}

impl UnitKind {
    pub fn category(&self) -> UnitCategory {
        match self {
            UnitKind::Aircraft { .. } | UnitKind::Helicopter { .. } => UnitCategory::Air,
            UnitKind::Vehicle { .. } | UnitKind::Infantry { .. } => UnitCategory::Land,
            UnitKind::Ship { .. } => UnitCategory::Sea,
            UnitKind::Structure => UnitCategory::Structure,
        }
    }

    /// Speed in the unit's native representation (m/s, or knots for ships).
    pub fn native_speed(&self) -> Option<f64> {
        match self {
            UnitKind::Aircraft { airspeed_mps, .. } | UnitKind::Helicopter { airspeed_mps } => {
                *airspeed_mps
            }
            UnitKind::Vehicle {
                ground_speed_mps, ..
            }
            | UnitKind::Infantry {
                ground_speed_mps, ..
            } => *ground_speed_mps,
            UnitKind::Ship { speed_knots, .. } => *speed_knots,
            UnitKind::Structure => None,
        }
    }

    /// Overwrite the native speed field. No-op for structures.
    pub fn set_native_speed(&mut self, speed: f64) {
        match self {
            UnitKind::Aircraft { airspeed_mps, .. } | UnitKind::Helicopter { airspeed_mps } => {
                *airspeed_mps = Some(speed)
            }
            UnitKind::Vehicle {
                ground_speed_mps, ..
            }
            | UnitKind::Infantry {
                ground_speed_mps, ..
            } => *ground_speed_mps = Some(speed),
            UnitKind::Ship { speed_knots, .. } => *speed_knots = Some(speed),
            UnitKind::Structure => {}
        }
    }

    /// Speed normalized to meters per second.
    pub fn speed_mps(&self) -> f64 {
        let native = self.native_speed().unwrap_or(0.0);
        match self {
            UnitKind::Ship { .. } => native * KNOTS_TO_MPS,
            _ => native,
        }
    }
}

/// One weapon mount and its ammunition state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSlot {
    pub weapon_id: String,
    pub count: u32,
    /// Reserve rounds not yet loaded.
    pub current_ammo: u32,
    pub max_ammo: u32,
    /// Rounds loaded in the magazine.
    pub current_magazine: u32,
    pub magazine_size: u32,
    pub reload_time_secs: f64,
    /// Seconds until the running reload completes (0 = not reloading).
    pub reload_remaining_secs: f64,
}

impl WeaponSlot {
    /// A fully loaded slot.
    pub fn full(
        weapon_id: impl Into<String>,
        count: u32,
        magazine_size: u32,
        total_ammo: u32,
        reload_time_secs: f64,
    ) -> Self {
        let loaded = magazine_size.min(total_ammo);
        Self {
            weapon_id: weapon_id.into(),
            count,
            current_ammo: total_ammo - loaded,
            max_ammo: total_ammo - loaded,
            current_magazine: loaded,
            magazine_size: loaded,
            reload_time_secs,
            reload_remaining_secs: 0.0,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining_secs > 0.0
    }

    pub fn can_fire(&self) -> bool {
        !self.is_reloading() && self.current_magazine > 0
    }

    pub fn rounds(&self) -> u32 {
        self.current_ammo.saturating_add(self.current_magazine)
    }

    pub fn capacity(&self) -> u32 {
        self.max_ammo.saturating_add(self.magazine_size)
    }

    /// Consume one round. Starts a reload when the magazine runs dry and
    /// reserve rounds remain. Returns false if the slot could not fire.
    pub fn consume_round(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.current_magazine -= 1;
        if self.current_magazine == 0 && self.current_ammo > 0 {
            self.reload_remaining_secs = self.reload_time_secs.max(f64::MIN_POSITIVE);
        }
        true
    }

    /// Advance a running reload by `dt` seconds.
    pub fn advance_reload(&mut self, dt: f64) {
        if !self.is_reloading() {
            return;
        }
        self.reload_remaining_secs -= dt;
        if self.reload_remaining_secs <= 0.0 {
            self.reload_remaining_secs = 0.0;
            let loaded = self
                .magazine_size
                .saturating_sub(self.current_magazine)
                .min(self.current_ammo);
            self.current_ammo -= loaded;
            self.current_magazine += loaded;
        }
    }

    /// Restore reserve and magazine to full and cancel any reload.
    pub fn refill(&mut self) {
        self.current_ammo = self.max_ammo;
        self.current_magazine = self.magazine_size;
        self.reload_remaining_secs = 0.0;
    }
}

/// A simulated unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    /// Free-text subcategory (e.g. "Fighter", "MainBattleTank").
    pub subcategory: String,
    pub position: GeoPosition,
    /// Heading in degrees (0–360, 0 = North).
    pub heading: f64,
    pub status: UnitStatus,
    pub health: f64,
    pub faction: FactionId,
    pub vision_range_m: f64,
    pub weapons: Vec<WeaponSlot>,
}

impl Unit {
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        kind: UnitKind,
        subcategory: impl Into<String>,
        faction: FactionId,
        position: GeoPosition,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            subcategory: subcategory.into(),
            position,
            heading: 0.0,
            status: UnitStatus::Idle,
            health: MAX_HEALTH,
            faction,
            vision_range_m: DEFAULT_VISION_RANGE_M,
            weapons: Vec::new(),
        }
    }

    pub fn category(&self) -> UnitCategory {
        self.kind.category()
    }

    pub fn is_destroyed(&self) -> bool {
        self.status == UnitStatus::Destroyed || self.health <= 0.0
    }

    /// Health relative to an undamaged unit.
    pub fn health_fraction(&self) -> f64 {
        self.health / MAX_HEALTH
    }

    pub fn speed_mps(&self) -> f64 {
        self.kind.speed_mps()
    }

    /// Remaining ammunition over capacity across all slots.
    /// Units without weapon slots report 1.0.
    pub fn ammo_fraction(&self) -> f64 {
        if self.weapons.is_empty() {
            return 1.0;
        }
        let capacity: u64 = self.weapons.iter().map(|slot| u64::from(slot.capacity())).sum();
        if capacity == 0 {
            return 0.0;
        }
        let rounds: u64 = self.weapons.iter().map(|slot| u64::from(slot.rounds())).sum();
        rounds as f64 / capacity as f64
    }

    /// First slot that can fire right now, with its index.
    pub fn ready_weapon(&self) -> Option<(usize, &WeaponSlot)> {
        self.weapons
            .iter()
            .enumerate()
            .find(|(_, slot)| slot.can_fire())
    }

    /// Consume a round from `slot`, or from the first ready slot when no slot
    /// is named. Units without weapon slots always fire; a named slot that
    /// does not exist or cannot fire refuses the shot.
    pub fn consume_round(&mut self, slot: Option<usize>) -> bool {
        if self.weapons.is_empty() {
            return true;
        }
        match slot {
            Some(index) => self
                .weapons
                .get_mut(index)
                .is_some_and(WeaponSlot::consume_round),
            None => self
                .weapons
                .iter_mut()
                .find(|slot| slot.can_fire())
                .is_some_and(WeaponSlot::consume_round),
        }
    }

    /// Reduce health by `amount`, clamping at zero. Marks the unit destroyed
    /// when health is exhausted. Returns true if this call destroyed it.
    pub fn apply_damage(&mut self, amount: f64) -> bool {
        let was_destroyed = self.is_destroyed();
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.status = UnitStatus::Destroyed;
        }
        !was_destroyed && self.is_destroyed()
    }
}

/// Type-specific projectile attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProjectilePayload {
    Bullet { caliber_mm: f64 },
    Shell { mass_kg: f64 },
    Missile { guidance_range_m: f64 },
}

impl ProjectilePayload {
    pub fn kind(&self) -> ProjectileKind {
        match self {
            ProjectilePayload::Bullet { .. } => ProjectileKind::Bullet,
            ProjectilePayload::Shell { .. } => ProjectileKind::Shell,
            ProjectilePayload::Missile { .. } => ProjectileKind::Missile,
        }
    }
}

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: GeoPosition,
    pub heading: f64,
    pub speed_mps: f64,
    pub damage: f64,
    pub owner: UnitId,
    pub payload: ProjectilePayload,
    /// Flight distance left before the projectile goes stale (meters).
    pub range_remaining_m: f64,
}

impl Projectile {
    pub fn kind(&self) -> ProjectileKind {
        self.payload.kind()
    }

    /// Out of range, or carried off the valid latitude band.
    pub fn is_spent(&self) -> bool {
        self.range_remaining_m <= 0.0 || self.position.latitude.abs() > 90.0
    }
}

/// A side in the conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    /// Hex color for display (e.g. "#FF0000").
    pub color: String,
    /// Factions this faction treats as friendly. Read literally: alliances
    /// are directed and may be asymmetric.
    pub allies: Vec<FactionId>,
}

impl Faction {
    pub fn new(id: FactionId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            allies: Vec::new(),
        }
    }

    pub fn is_allied_with(&self, other: FactionId) -> bool {
        self.allies.contains(&other)
    }
}

/// Whether units of faction `from` treat units of faction `to` as hostile.
///
/// Same-faction pairs are never hostile. Otherwise only `from`'s ally list
/// is consulted; `to`'s list is irrelevant. Unknown factions ally with no one.
pub fn is_hostile(factions: &[Faction], from: FactionId, to: FactionId) -> bool {
    if from == to {
        return false;
    }
    !factions
        .iter()
        .find(|faction| faction.id == from)
        .is_some_and(|faction| faction.is_allied_with(to))
}
