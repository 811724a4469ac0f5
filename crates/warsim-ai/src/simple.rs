//! Stateless wander-and-shoot behavior, the alternative to the state machine.

use rand::Rng;

use warsim_core::commands::{Command, FireCommand, MoveCommand};
use warsim_core::components::Unit;
use warsim_core::constants::*;
use warsim_core::enums::{ProjectileKind, UnitStatus};
use warsim_core::state::WorldState;
use warsim_core::types::normalize_heading;

/// Commands for one unit this tick.
pub fn decide<R: Rng + ?Sized>(unit: &Unit, world: &WorldState, rng: &mut R) -> Vec<Command> {
    let mut commands = Vec::new();

    match unit.status {
        UnitStatus::Idle => {
            let heading = rng.gen_range(0.0..360.0);
            commands.push(Command::Move(MoveCommand::heading_and_speed(
                unit.id,
                heading,
                SIMPLE_WANDER_SPEED,
            )));
        }
        UnitStatus::Moving => {
            let jitter = (rng.gen::<f64>() - 0.5) * SIMPLE_HEADING_JITTER_DEG;
            commands.push(Command::Move(MoveCommand::heading(
                unit.id,
                normalize_heading(unit.heading + jitter),
            )));
        }
        _ => {}
    }

    if let Some((enemy, distance)) = world.nearest_hostile(unit, unit.vision_range_m) {
        let heading = unit.position.bearing_to(&enemy.position);
        commands.push(Command::Move(MoveCommand::heading(unit.id, heading)));
        if distance <= SIMPLE_FIRE_RANGE_M {
            commands.push(Command::Fire(FireCommand {
                unit: unit.id,
                kind: ProjectileKind::Bullet,
                heading,
                speed_mps: DEFAULT_PROJECTILE_SPEED_MPS,
                damage: DEFAULT_PROJECTILE_DAMAGE,
                range_m: DEFAULT_PROJECTILE_RANGE_M,
                slot: None,
                target: Some(enemy.id),
            }));
        }
    }

    commands
}
