//! Per-unit weapon housekeeping and opportunistic fire.

use rand::Rng;

use warsim_core::commands::FireCommand;
use warsim_core::components::{Projectile, ProjectilePayload, Unit, UnitKind};
use warsim_core::constants::*;
use warsim_core::enums::ProjectileKind;

use crate::factory::ProjectileFactory;

/// Tick down running reloads on every slot.
pub fn advance_reloads(unit: &mut Unit, dt: f64) {
    for slot in &mut unit.weapons {
        slot.advance_reload(dt);
    }
}

/// Random fire along the unit's current heading.
///
/// Aircraft fire a bullet 1 % of ticks, ground vehicles a heavy shell 0.2 %
/// of ticks. Other kinds and destroyed units never fire.
pub fn try_fire<R: Rng + ?Sized>(
    unit: &Unit,
    factory: &ProjectileFactory,
    rng: &mut R,
) -> Option<Projectile> {
    if unit.is_destroyed() {
        return None;
    }

    let (chance, kind, speed_mps, damage, range_m) = match unit.kind {
        UnitKind::Aircraft { .. } => (
            AIRCRAFT_FIRE_CHANCE,
            ProjectileKind::Bullet,
            DEFAULT_PROJECTILE_SPEED_MPS,
            DEFAULT_PROJECTILE_DAMAGE,
            DEFAULT_PROJECTILE_RANGE_M,
        ),
        UnitKind::Vehicle { .. } => (
            VEHICLE_FIRE_CHANCE,
            ProjectileKind::Shell,
            OPPORTUNISTIC_SHELL_SPEED_MPS,
            OPPORTUNISTIC_SHELL_DAMAGE,
            OPPORTUNISTIC_SHELL_RANGE_M,
        ),
        _ => return None,
    };

    if !rng.gen_bool(chance) {
        return None;
    }

    let fire = FireCommand {
        unit: unit.id,
        kind,
        heading: unit.heading,
        speed_mps,
        damage,
        range_m,
        slot: None,
        target: None,
    };
    let mut projectile = factory.create(&fire, unit.position);
    if kind == ProjectileKind::Shell {
        projectile.payload = ProjectilePayload::Shell {
            mass_kg: OPPORTUNISTIC_SHELL_MASS_KG,
        };
    }
    Some(projectile)
}
