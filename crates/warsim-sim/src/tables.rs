//! Configuration tables loaded at startup and shared read-only by the tick.

use std::path::Path;

use warsim_ai::BehaviorTable;
use warsim_core::config::{load_or_default, DamageTable, WeaponTable};

pub const WEAPONS_FILE: &str = "weapons.json";
pub const DAMAGE_FILE: &str = "damage-table.json";
pub const BEHAVIORS_FILE: &str = "ai-behaviors.json";

#[derive(Debug, Clone, Default)]
pub struct SimTables {
    pub weapons: WeaponTable,
    pub damage: DamageTable,
    pub behaviors: BehaviorTable,
}

impl SimTables {
    /// Load every table from `dir`. Missing or malformed files are logged
    /// and replaced with empty tables.
    pub fn load(dir: &Path) -> Self {
        let tables = Self {
            weapons: load_or_default(&dir.join(WEAPONS_FILE)),
            damage: load_or_default(&dir.join(DAMAGE_FILE)),
            behaviors: load_or_default(&dir.join(BEHAVIORS_FILE)),
        };
        tracing::info!(
            weapons = tables.weapons.weapons.len(),
            loadouts = tables.weapons.loadouts.len(),
            damage_multipliers = tables.damage.damage_multipliers.len(),
            armor_values = tables.damage.armor_values.len(),
            behaviors = tables.behaviors.behaviors.len(),
            "simulation tables ready"
        );
        tables
    }
}
