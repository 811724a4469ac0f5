//! Projectile impact resolution.
//!
//! Each projectile is tested against the nearest eligible unit only. A hit
//! applies damage, consumes the projectile and returns it to its pool. A miss
//! stays in flight until its range runs out, then it is pooled as well.
//! Projectiles never collide with each other.

use warsim_core::components::{is_hostile, Faction, Projectile, Unit};
use warsim_core::config::DamageTable;
use warsim_core::events::{EventSink, SimEvent};

use crate::factory::ProjectileFactory;

/// Resolve impacts, retire stale misses and return the projectiles still in
/// flight.
///
/// Eligible targets are live units other than the owner that the owner's
/// faction considers hostile. When the owner is no longer in `units`, every
/// other live unit is eligible.
pub fn process_projectiles(
    projectiles: Vec<Projectile>,
    units: &mut [Unit],
    factions: &[Faction],
    factory: &ProjectileFactory,
    damage: &DamageTable,
    events: &dyn EventSink,
) -> Vec<Projectile> {
    let mut remaining = Vec::with_capacity(projectiles.len());

    for projectile in projectiles {
        let owner_faction = units
            .iter()
            .find(|unit| unit.id == projectile.owner)
            .map(|unit| unit.faction);

        let nearest = units
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.id != projectile.owner && !unit.is_destroyed())
            .filter(|(_, unit)| {
                owner_faction.map_or(true, |faction| is_hostile(factions, faction, unit.faction))
            })
            .map(|(index, unit)| (index, projectile.position.distance_to(&unit.position)))
            .fold(None, |best: Option<(usize, f64)>, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            });

        let hit = nearest.filter(|(_, distance)| *distance <= projectile.kind().hit_radius_m());
        let Some((index, _)) = hit else {
            if projectile.is_spent() {
                events.emit(SimEvent::ProjectileExpired {
                    owner: projectile.owner,
                    projectile: projectile.id,
                    kind: projectile.kind(),
                });
                factory.release(projectile);
            } else {
                remaining.push(projectile);
            }
            continue;
        };

        let target = &mut units[index];
        let kind = projectile.kind();
        let dealt = damage.calculate_damage(kind, target, projectile.damage);
        if target.apply_damage(dealt) {
            events.emit(SimEvent::UnitDestroyed {
                shooter: projectile.owner,
                target: target.id,
                kind,
                damage: dealt,
            });
        } else {
            events.emit(SimEvent::UnitHit {
                shooter: projectile.owner,
                target: target.id,
                kind,
                damage: dealt,
                remaining_health: target.health,
            });
        }
        factory.release(projectile);
    }

    remaining
}
