//! Pooled projectile construction.
//!
//! One free list per projectile kind. A recycled projectile is re-initialized
//! in full, including a fresh id, so nothing from its previous flight leaks
//! into the new one.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use warsim_core::commands::FireCommand;
use warsim_core::components::{Projectile, ProjectilePayload};
use warsim_core::constants::{BULLET_CALIBER_MM, MISSILE_GUIDANCE_RANGE_M, SHELL_MASS_KG};
use warsim_core::enums::ProjectileKind;
use warsim_core::types::{GeoPosition, ProjectileId};

/// Pool counters, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Projectiles built from scratch.
    pub allocated: u64,
    /// Projectiles served from a free list.
    pub reused: u64,
    /// Projectiles currently parked in free lists.
    pub available: usize,
}

#[derive(Debug)]
pub struct ProjectileFactory {
    bullets: Mutex<Vec<Projectile>>,
    shells: Mutex<Vec<Projectile>>,
    missiles: Mutex<Vec<Projectile>>,
    next_id: AtomicU64,
    allocated: AtomicU64,
    reused: AtomicU64,
}

impl Default for ProjectileFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectileFactory {
    pub fn new() -> Self {
        Self {
            bullets: Mutex::new(Vec::new()),
            shells: Mutex::new(Vec::new()),
            missiles: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            allocated: AtomicU64::new(0),
            reused: AtomicU64::new(0),
        }
    }

    fn pool(&self, kind: ProjectileKind) -> &Mutex<Vec<Projectile>> {
        match kind {
            ProjectileKind::Bullet => &self.bullets,
            ProjectileKind::Shell => &self.shells,
            ProjectileKind::Missile => &self.missiles,
        }
    }

    /// A projectile for `fire`, launched from `origin`.
    pub fn create(&self, fire: &FireCommand, origin: GeoPosition) -> Projectile {
        let id = ProjectileId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let fresh = Projectile {
            id,
            position: origin,
            heading: fire.heading,
            speed_mps: fire.speed_mps,
            damage: fire.damage,
            owner: fire.unit,
            payload: default_payload(fire.kind),
            range_remaining_m: fire.range_m,
        };

        match self.pool(fire.kind).lock().pop() {
            Some(mut recycled) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                recycled.clone_from(&fresh);
                recycled
            }
            None => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                fresh
            }
        }
    }

    /// Park a projectile for reuse. The caller gives up ownership, so the
    /// same instance can never be handed out twice.
    pub fn release(&self, projectile: Projectile) {
        self.pool(projectile.kind()).lock().push(projectile);
    }

    pub fn stats(&self) -> PoolStats {
        let available = ProjectileKind::ALL
            .iter()
            .map(|kind| self.pool(*kind).lock().len())
            .sum();
        PoolStats {
            allocated: self.allocated.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            available,
        }
    }
}

fn default_payload(kind: ProjectileKind) -> ProjectilePayload {
    match kind {
        ProjectileKind::Bullet => ProjectilePayload::Bullet {
            caliber_mm: BULLET_CALIBER_MM,
        },
        ProjectileKind::Shell => ProjectilePayload::Shell {
            mass_kg: SHELL_MASS_KG,
        },
        ProjectileKind::Missile => ProjectilePayload::Missile {
            guidance_range_m: MISSILE_GUIDANCE_RANGE_M,
        },
    }
}
