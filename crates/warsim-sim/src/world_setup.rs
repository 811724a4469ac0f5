//! Starting scenarios.
//!
//! Builds initial `WorldState`s with factions and units, equipping every unit
//! from the weapon table's loadouts.

use warsim_core::components::{Faction, Unit, UnitKind};
use warsim_core::config::WeaponTable;
use warsim_core::state::WorldState;
use warsim_core::types::{FactionId, GeoPosition, UnitId};

pub const BLUE: FactionId = FactionId(1);
pub const RED: FactionId = FactionId(2);

/// Two opposing task groups a few kilometres apart.
pub fn demo_skirmish(weapons: &WeaponTable) -> WorldState {
    let factions = vec![
        Faction::new(BLUE, "Blue Force", "#1E90FF"),
        Faction::new(RED, "Red Force", "#DC143C"),
    ];

    let mut next_id = 0;
    let mut spawn = |name: &str, kind: UnitKind, subcategory: &str, faction, lat, lon| {
        next_id += 1;
        let mut unit = Unit::new(
            UnitId(next_id),
            name,
            kind,
            subcategory,
            faction,
            GeoPosition::new(lat, lon),
        );
        weapons.equip(&mut unit);
        unit
    };

    let units = vec![
        spawn("Blue Lead", fighter(), "Fighter", BLUE, 50.000, 10.000),
        spawn("Blue Armor 1", tank(), "MainBattleTank", BLUE, 49.990, 10.010),
        spawn("Blue Armor 2", tank(), "MainBattleTank", BLUE, 49.990, 10.014),
        spawn("Blue Frigate", frigate(), "Frigate", BLUE, 49.950, 9.990),
        spawn("Red Lead", fighter(), "Fighter", RED, 50.020, 10.020),
        spawn("Red Armor 1", tank(), "MainBattleTank", RED, 50.005, 10.015),
        spawn("Red Infantry", rifles(), "Rifles", RED, 50.006, 10.018),
        spawn("Red Bunker", UnitKind::Structure, "Bunker", RED, 50.010, 10.020),
    ];

    WorldState::new(units, Vec::new(), factions, 0)
}

fn fighter() -> UnitKind {
    UnitKind::Aircraft {
        airspeed_mps: Some(0.0),
        max_altitude_m: Some(15_000.0),
        capacity: Some(1),
    }
}

fn tank() -> UnitKind {
    UnitKind::Vehicle {
        ground_speed_mps: Some(0.0),
        crew: Some(4),
    }
}

fn frigate() -> UnitKind {
    UnitKind::Ship {
        speed_knots: Some(0.0),
        crew: Some(180),
    }
}

fn rifles() -> UnitKind {
    UnitKind::Infantry {
        ground_speed_mps: Some(0.0),
        strength: Some(30),
    }
}
