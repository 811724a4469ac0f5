//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad unit category used for speed semantics and config fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Air,
    Land,
    Sea,
    Structure,
}

impl UnitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Air => "Air",
            UnitCategory::Land => "Land",
            UnitCategory::Sea => "Sea",
            UnitCategory::Structure => "Structure",
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit activity status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    #[default]
    Idle,
    Moving,
    InCombat,
    Retreating,
    Destroyed,
}

/// Projectile discriminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Bullet,
    Shell,
    Missile,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 3] = [
        ProjectileKind::Bullet,
        ProjectileKind::Shell,
        ProjectileKind::Missile,
    ];

    /// Maximum projectile-to-target distance that registers a hit (meters).
    pub fn hit_radius_m(&self) -> f64 {
        use crate::constants::*;
        match self {
            ProjectileKind::Bullet => BULLET_HIT_RADIUS_M,
            ProjectileKind::Shell => SHELL_HIT_RADIUS_M,
            ProjectileKind::Missile => MISSILE_HIT_RADIUS_M,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::Bullet => "Bullet",
            ProjectileKind::Shell => "Shell",
            ProjectileKind::Missile => "Missile",
        }
    }

    /// Case-insensitive parse of a config string.
    pub fn parse(name: &str) -> Option<ProjectileKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ProjectileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AI behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiStateKind {
    #[default]
    Idle,
    Patrol,
    Engage,
    Retreat,
    Rearm,
}

impl AiStateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiStateKind::Idle => "Idle",
            AiStateKind::Patrol => "Patrol",
            AiStateKind::Engage => "Engage",
            AiStateKind::Retreat => "Retreat",
            AiStateKind::Rearm => "Rearm",
        }
    }
}

impl fmt::Display for AiStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
