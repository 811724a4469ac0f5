//! Behavior profiles and per-category movement speeds.
//!
//! Profiles come from `ai-behaviors.json`; lookup falls back from the unit's
//! subcategory to its category name and finally to the built-in default.

use serde::{Deserialize, Serialize};

use warsim_core::components::Unit;
use warsim_core::constants::*;
use warsim_core::enums::{AiStateKind, UnitCategory};

/// Tunable behavior of one unit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorProfile {
    /// Subcategory or category name this profile applies to.
    pub unit_type: String,
    pub initial_state: AiStateKind,
    #[serde(rename = "aggressionLevel")]
    pub aggression: f64,
    #[serde(rename = "engageRange")]
    pub engage_range_m: f64,
    /// Health fraction at or below which the unit retreats.
    pub retreat_health_threshold: f64,
    #[serde(rename = "patrolRadius")]
    pub patrol_radius_m: f64,
    /// Ammo fraction below which an engaging unit breaks off to rearm.
    pub rearm_ammo_threshold: f64,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            unit_type: String::new(),
            initial_state: AiStateKind::Idle,
            aggression: 0.5,
            engage_range_m: 2000.0,
            retreat_health_threshold: 0.3,
            patrol_radius_m: 5000.0,
            rearm_ammo_threshold: 0.2,
        }
    }
}

/// Contents of `ai-behaviors.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorTable {
    pub behaviors: Vec<BehaviorProfile>,
}

impl BehaviorTable {
    /// Profile for `unit`: exact subcategory, then category name, then default.
    pub fn profile_for(&self, unit: &Unit) -> BehaviorProfile {
        let by_type = |name: &str| {
            self.behaviors
                .iter()
                .find(|profile| profile.unit_type.eq_ignore_ascii_case(name))
        };
        by_type(&unit.subcategory)
            .or_else(|| by_type(unit.category().as_str()))
            .cloned()
            .unwrap_or_default()
    }
}

/// Speeds used by the state machine, in the category's native unit
/// (m/s for air and land, knots for sea).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedProfile {
    pub cruise: f64,
    pub max: f64,
    pub rearm: f64,
}

/// Get the speed profile for a unit category.
pub fn speed_profile(category: UnitCategory) -> SpeedProfile {
    match category {
        UnitCategory::Air => SpeedProfile {
            cruise: AIR_CRUISE_SPEED,
            max: AIR_MAX_SPEED,
            rearm: AIR_REARM_SPEED,
        },
        UnitCategory::Land => SpeedProfile {
            cruise: LAND_CRUISE_SPEED,
            max: LAND_MAX_SPEED,
            rearm: LAND_REARM_SPEED,
        },
        UnitCategory::Sea => SpeedProfile {
            cruise: SEA_CRUISE_SPEED_KNOTS,
            max: SEA_MAX_SPEED_KNOTS,
            rearm: SEA_REARM_SPEED_KNOTS,
        },
        // Structures ignore speed changes; values only keep commands well-formed.
        UnitCategory::Structure => SpeedProfile {
            cruise: 5.0,
            max: 10.0,
            rearm: 5.0,
        },
    }
}
