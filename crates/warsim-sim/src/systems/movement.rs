//! Kinematic integration on the geographic grid.
//!
//! Advances units and projectiles along their heading by `speed * dt` using
//! the flat-earth approximation in `GeoPosition::advanced`.

use warsim_core::components::{Projectile, Unit};
use warsim_core::error::SimError;

/// Working copy of a unit for the current tick.
pub fn clone_unit(unit: &Unit) -> Unit {
    unit.clone()
}

/// Working copy of a projectile for the current tick.
pub fn clone_projectile(projectile: &Projectile) -> Projectile {
    projectile.clone()
}

/// Move a unit for `dt` seconds. Destroyed units stay put.
///
/// Fails without touching the unit when the move would leave it at a
/// non-finite position.
pub fn update_unit_movement(unit: &mut Unit, dt: f64) -> Result<(), SimError> {
    if unit.is_destroyed() {
        return Ok(());
    }
    let speed = unit.speed_mps();
    let next = unit.position.advanced(unit.heading, speed * dt);
    if !next.is_finite() {
        return Err(SimError::UnitKinematics {
            unit: unit.id,
            heading: unit.heading,
            speed_mps: speed,
        });
    }
    unit.position = next;
    Ok(())
}

/// Move a projectile for `dt` seconds and charge the distance against its
/// remaining range.
pub fn update_projectile_movement(projectile: &mut Projectile, dt: f64) -> Result<(), SimError> {
    let distance = projectile.speed_mps * dt;
    let next = projectile.position.advanced(projectile.heading, distance);
    if !next.is_finite() {
        return Err(SimError::ProjectileKinematics {
            projectile: projectile.id,
            heading: projectile.heading,
            speed_mps: projectile.speed_mps,
        });
    }
    projectile.position = next;
    projectile.range_remaining_m -= distance.abs();
    Ok(())
}
