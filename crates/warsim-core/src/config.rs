//! Read-only configuration tables consumed during a tick.
//!
//! Tables are JSON documents loaded once at startup. A missing or malformed
//! file is logged and replaced by an empty table so the simulation runs with
//! degraded fidelity instead of refusing to start.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::components::{Unit, WeaponSlot};
use crate::constants::{ARMOR_DAMAGE_FACTOR, MIN_DAMAGE_FRACTION};
use crate::enums::ProjectileKind;
use crate::error::ConfigError;

/// Static stats of one weapon type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeaponDefinition {
    pub id: String,
    pub name: String,
    pub projectile_type: String,
    pub damage: f64,
    #[serde(rename = "range")]
    pub range_m: f64,
    #[serde(rename = "projectileSpeed")]
    pub projectile_speed_mps: f64,
    /// Shots per second.
    pub rate_of_fire: f64,
    pub magazine_size: u32,
    pub total_ammo: u32,
    #[serde(rename = "reloadTime")]
    pub reload_time_secs: f64,
}

impl Default for WeaponDefinition {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            projectile_type: ProjectileKind::Bullet.as_str().to_string(),
            damage: 10.0,
            range_m: 2000.0,
            projectile_speed_mps: 400.0,
            rate_of_fire: 1.0,
            magazine_size: 30,
            total_ammo: 300,
            reload_time_secs: 3.0,
        }
    }
}

impl WeaponDefinition {
    /// Projectile kind, falling back to bullets for unknown names.
    pub fn projectile_kind(&self) -> ProjectileKind {
        ProjectileKind::parse(&self.projectile_type).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutEntry {
    pub weapon_id: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

/// Weapons mounted on a unit type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Loadout {
    pub unit_category: String,
    pub unit_subcategory: String,
    pub weapons: Vec<LoadoutEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub weapons: Vec<WeaponDefinition>,
    pub loadouts: Vec<Loadout>,
}

impl WeaponTable {
    pub fn weapon(&self, id: &str) -> Option<&WeaponDefinition> {
        self.weapons.iter().find(|weapon| weapon.id == id)
    }

    /// Loadout matching both category and subcategory (case-insensitive).
    pub fn loadout_for(&self, category: &str, subcategory: &str) -> Option<&Loadout> {
        self.loadouts.iter().find(|loadout| {
            loadout.unit_category.eq_ignore_ascii_case(category)
                && loadout.unit_subcategory.eq_ignore_ascii_case(subcategory)
        })
    }

    /// Fill a freshly created unit's weapon slots from its loadout.
    /// Entries naming unknown weapons are skipped. Returns the slot count.
    pub fn equip(&self, unit: &mut Unit) -> usize {
        let Some(loadout) = self.loadout_for(unit.category().as_str(), &unit.subcategory) else {
            return 0;
        };
        unit.weapons = loadout
            .weapons
            .iter()
            .filter_map(|entry| {
                let weapon = self.weapon(&entry.weapon_id)?;
                Some(WeaponSlot::full(
                    weapon.id.clone(),
                    entry.count,
                    weapon.magazine_size.saturating_mul(entry.count),
                    weapon.total_ammo.saturating_mul(entry.count),
                    weapon.reload_time_secs,
                ))
            })
            .collect();
        unit.weapons.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageMultiplier {
    pub projectile_type: String,
    pub target_category: String,
    /// Empty means "any subcategory of the category".
    #[serde(default)]
    pub target_subcategory: String,
    pub multiplier: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorValue {
    pub unit_category: String,
    #[serde(default)]
    pub unit_subcategory: String,
    pub armor_points: f64,
    #[serde(default)]
    pub description: String,
}

/// Damage multipliers and armor, resolved exact-match first, then by
/// category alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageTable {
    pub damage_multipliers: Vec<DamageMultiplier>,
    pub armor_values: Vec<ArmorValue>,
}

impl DamageTable {
    /// Multiplier for `kind` against `target`; 1.0 when nothing matches.
    pub fn multiplier(&self, kind: ProjectileKind, target: &Unit) -> f64 {
        let category = target.category().as_str();
        let candidates = || {
            self.damage_multipliers.iter().filter(move |m| {
                m.projectile_type.eq_ignore_ascii_case(kind.as_str())
                    && m.target_category.eq_ignore_ascii_case(category)
            })
        };

        candidates()
            .find(|m| {
                !m.target_subcategory.is_empty()
                    && m.target_subcategory.eq_ignore_ascii_case(&target.subcategory)
            })
            .or_else(|| candidates().find(|m| m.target_subcategory.is_empty()))
            .map_or(1.0, |m| m.multiplier)
    }

    /// Armor points of `target`; 0 when nothing matches.
    pub fn armor(&self, target: &Unit) -> f64 {
        let category = target.category().as_str();
        let candidates = || {
            self.armor_values
                .iter()
                .filter(move |a| a.unit_category.eq_ignore_ascii_case(category))
        };

        candidates()
            .find(|a| a.unit_subcategory.eq_ignore_ascii_case(&target.subcategory))
            .or_else(|| candidates().find(|a| a.unit_subcategory.is_empty()))
            .map_or(0.0, |a| a.armor_points)
    }

    /// Effective damage of a hit: `base * multiplier - armor * 0.1`, never
    /// less than 10 % of `base`.
    pub fn calculate_damage(&self, kind: ProjectileKind, target: &Unit, base: f64) -> f64 {
        let scaled = base * self.multiplier(kind, target) - self.armor(target) * ARMOR_DAMAGE_FACTOR;
        scaled.max(base * MIN_DAMAGE_FRACTION)
    }
}

/// Read and parse one JSON table.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like `load_json`, but logs failures and substitutes the default table.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(table) => {
            tracing::info!(path = %path.display(), "loaded config table");
            table
        }
        Err(error) => {
            tracing::error!(%error, "config table unavailable, using defaults");
            T::default()
        }
    }
}
