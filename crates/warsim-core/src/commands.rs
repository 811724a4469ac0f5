//! Commands produced by AI during fan-out and applied serially by the engine.

use serde::{Deserialize, Serialize};

use crate::enums::ProjectileKind;
use crate::types::{GeoPosition, UnitId};

/// Overwrite any provided kinematic fields of a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCommand {
    pub unit: UnitId,
    pub position: Option<GeoPosition>,
    pub heading: Option<f64>,
    /// Speed in the unit's native representation (knots for ships).
    pub speed: Option<f64>,
}

impl MoveCommand {
    pub fn heading(unit: UnitId, heading: f64) -> Self {
        Self {
            unit,
            position: None,
            heading: Some(heading),
            speed: None,
        }
    }

    pub fn heading_and_speed(unit: UnitId, heading: f64, speed: f64) -> Self {
        Self {
            unit,
            position: None,
            heading: Some(heading),
            speed: Some(speed),
        }
    }

    pub fn speed(unit: UnitId, speed: f64) -> Self {
        Self {
            unit,
            position: None,
            heading: None,
            speed: Some(speed),
        }
    }
}

/// Materialize a projectile at the shooter's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireCommand {
    pub unit: UnitId,
    pub kind: ProjectileKind,
    pub heading: f64,
    pub speed_mps: f64,
    pub damage: f64,
    /// Distance the projectile may fly before it is retired.
    pub range_m: f64,
    /// Weapon slot that pays for the shot. `None` takes a round from the
    /// first ready slot, if the unit carries any.
    pub slot: Option<usize>,
    /// Unit being aimed at, for reporting only.
    pub target: Option<UnitId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    Move(MoveCommand),
    Fire(FireCommand),
}

impl Command {
    /// The unit the command applies to.
    pub fn unit(&self) -> UnitId {
        match self {
            Command::Move(cmd) => cmd.unit,
            Command::Fire(cmd) => cmd.unit,
        }
    }
}
