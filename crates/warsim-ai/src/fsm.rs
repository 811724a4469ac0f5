//! Unit behavior finite state machine.
//!
//! One call to [`step`] runs a single tick for one unit: pending entry
//! actions, the current state's update, then at most one transition. The unit
//! passed in is the engine's private clone; status changes and rearming are
//! written to it directly, everything else leaves as commands.

use rand::Rng;

use warsim_core::commands::{Command, FireCommand, MoveCommand};
use warsim_core::components::Unit;
use warsim_core::config::WeaponTable;
use warsim_core::constants::*;
use warsim_core::enums::{AiStateKind, ProjectileKind, UnitStatus};
use warsim_core::events::{EventSink, SimEvent};
use warsim_core::state::WorldState;

use crate::context::AiContext;
use crate::error::AiError;
use crate::profiles::speed_profile;

/// Read-only inputs shared by every unit during one tick.
pub struct Situation<'a> {
    /// Snapshot taken at the start of the tick.
    pub world: &'a WorldState,
    pub weapons: &'a WeaponTable,
    pub events: &'a dyn EventSink,
    /// Tick length in seconds.
    pub dt: f64,
}

/// Advance one unit's state machine by one tick and return its commands.
pub fn step<R: Rng + ?Sized>(
    unit: &mut Unit,
    ctx: &mut AiContext,
    situation: &Situation<'_>,
    rng: &mut R,
) -> Result<Vec<Command>, AiError> {
    if !unit.position.is_finite() {
        return Err(AiError::InvalidPosition { unit: unit.id });
    }
    if !situation.dt.is_finite() || situation.dt < 0.0 {
        return Err(AiError::InvalidTimeStep { dt: situation.dt });
    }

    let mut commands = Vec::new();

    if !ctx.entered {
        ctx.entered = true;
        on_enter(ctx.state, unit, ctx, situation, rng, &mut commands);
    }

    ctx.time_in_state += situation.dt;
    on_update(unit, ctx, situation, rng, &mut commands);

    if let Some(next) = check_transitions(unit, ctx, situation) {
        situation.events.emit(SimEvent::StateTransition {
            unit: unit.id,
            from: ctx.state,
            to: next,
        });
        ctx.last_state = Some(ctx.state);
        ctx.state = next;
        ctx.time_in_state = 0.0;
        on_enter(next, unit, ctx, situation, rng, &mut commands);
    }

    Ok(commands)
}

fn on_enter<R: Rng + ?Sized>(
    state: AiStateKind,
    unit: &mut Unit,
    ctx: &mut AiContext,
    situation: &Situation<'_>,
    rng: &mut R,
    commands: &mut Vec<Command>,
) {
    let speeds = speed_profile(unit.category());
    match state {
        AiStateKind::Idle => unit.status = UnitStatus::Idle,
        AiStateKind::Patrol => {
            unit.status = UnitStatus::Moving;
            ctx.scratch.patrol_leg_elapsed = 0.0;
            commands.push(random_leg(unit, rng));
        }
        AiStateKind::Engage => {
            unit.status = UnitStatus::InCombat;
            ctx.scratch.last_fire_at = 0.0;
        }
        AiStateKind::Retreat => {
            unit.status = UnitStatus::Retreating;
            ctx.scratch.calm_elapsed = 0.0;
            if let Some(away) = heading_away_from_threat(unit, situation.world) {
                commands.push(Command::Move(MoveCommand::heading_and_speed(
                    unit.id, away, speeds.max,
                )));
            }
        }
        AiStateKind::Rearm => {
            unit.status = UnitStatus::Moving;
            commands.push(Command::Move(MoveCommand::speed(unit.id, speeds.rearm)));
        }
    }
}

fn on_update<R: Rng + ?Sized>(
    unit: &mut Unit,
    ctx: &mut AiContext,
    situation: &Situation<'_>,
    rng: &mut R,
    commands: &mut Vec<Command>,
) {
    match ctx.state {
        AiStateKind::Idle => {}
        AiStateKind::Patrol => {
            ctx.scratch.patrol_leg_elapsed += situation.dt;
            if ctx.scratch.patrol_leg_elapsed > PATROL_LEG_SECS {
                ctx.scratch.patrol_leg_elapsed = 0.0;
                commands.push(random_leg(unit, rng));
            }
        }
        AiStateKind::Engage => update_engage(unit, ctx, situation, commands),
        AiStateKind::Retreat => match heading_away_from_threat(unit, situation.world) {
            Some(away) => {
                ctx.scratch.calm_elapsed = 0.0;
                let speed = speed_profile(unit.category()).max;
                commands.push(Command::Move(MoveCommand::heading_and_speed(
                    unit.id, away, speed,
                )));
            }
            None => ctx.scratch.calm_elapsed += situation.dt,
        },
        AiStateKind::Rearm => {
            if ctx.time_in_state >= REARM_DURATION_SECS {
                unit.weapons.iter_mut().for_each(|slot| slot.refill());
            }
        }
    }
}

fn update_engage(
    unit: &Unit,
    ctx: &mut AiContext,
    situation: &Situation<'_>,
    commands: &mut Vec<Command>,
) {
    let Some(target) = ctx
        .target
        .and_then(|id| situation.world.unit(id))
        .filter(|target| !target.is_destroyed())
    else {
        return;
    };

    let distance = unit.position.distance_to(&target.position);
    let heading = unit.position.bearing_to(&target.position);
    commands.push(Command::Move(MoveCommand::heading(unit.id, heading)));

    let cooled_down = ctx.time_in_state - ctx.scratch.last_fire_at >= ENGAGE_FIRE_COOLDOWN_SECS;
    if distance > ctx.profile.engage_range_m || !cooled_down {
        return;
    }
    if let Some(shot) = fire_parameters(unit, situation.weapons) {
        commands.push(Command::Fire(FireCommand {
            unit: unit.id,
            kind: shot.kind,
            heading,
            speed_mps: shot.speed_mps,
            damage: shot.damage,
            range_m: shot.range_m,
            slot: shot.slot,
            target: Some(target.id),
        }));
        ctx.scratch.last_fire_at = ctx.time_in_state;
    }
}

fn check_transitions(
    unit: &Unit,
    ctx: &mut AiContext,
    situation: &Situation<'_>,
) -> Option<AiStateKind> {
    let world = situation.world;
    let profile = &ctx.profile;
    let wounded = unit.health_fraction() <= profile.retreat_health_threshold;

    match ctx.state {
        AiStateKind::Idle => {
            if profile.aggression > IDLE_ENGAGE_AGGRESSION {
                if let Some((enemy, _)) = world.nearest_hostile(unit, unit.vision_range_m) {
                    ctx.target = Some(enemy.id);
                    return Some(AiStateKind::Engage);
                }
            }
            (ctx.time_in_state > IDLE_PATROL_DWELL_SECS && profile.patrol_radius_m > 0.0)
                .then_some(AiStateKind::Patrol)
        }
        AiStateKind::Patrol => {
            if wounded {
                return Some(AiStateKind::Retreat);
            }
            let (enemy, _) = world.nearest_hostile(unit, unit.vision_range_m)?;
            ctx.target = Some(enemy.id);
            Some(AiStateKind::Engage)
        }
        AiStateKind::Engage => {
            if wounded {
                return Some(AiStateKind::Retreat);
            }
            let target = ctx
                .target
                .and_then(|id| world.unit(id))
                .filter(|target| !target.is_destroyed());
            let in_contact = target.is_some_and(|target| {
                unit.position.distance_to(&target.position)
                    <= unit.vision_range_m * CONTACT_LOST_RANGE_FACTOR
            });
            if !in_contact {
                ctx.target = None;
                return Some(AiStateKind::Patrol);
            }
            if !unit.weapons.is_empty() && unit.ammo_fraction() < profile.rearm_ammo_threshold {
                ctx.target = None;
                return Some(AiStateKind::Rearm);
            }
            None
        }
        AiStateKind::Retreat => {
            if unit.health_fraction() > profile.retreat_health_threshold + RETREAT_RECOVERY_MARGIN {
                return Some(AiStateKind::Patrol);
            }
            (ctx.scratch.calm_elapsed > RETREAT_CALM_SECS).then_some(AiStateKind::Idle)
        }
        AiStateKind::Rearm => {
            let threatened = world.nearest_hostile(unit, unit.vision_range_m).is_some();
            if threatened && unit.health_fraction() < REARM_RETREAT_HEALTH {
                return Some(AiStateKind::Retreat);
            }
            (ctx.time_in_state >= REARM_DURATION_SECS).then_some(AiStateKind::Patrol)
        }
    }
}

/// What the next shot looks like and which slot pays for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotParameters {
    /// `None` for units without weapon slots.
    pub slot: Option<usize>,
    pub kind: ProjectileKind,
    pub speed_mps: f64,
    pub damage: f64,
    pub range_m: f64,
}

impl ShotParameters {
    /// The bullet fired by units without a usable weapon definition.
    pub fn default_bullet(slot: Option<usize>) -> Self {
        Self {
            slot,
            kind: ProjectileKind::Bullet,
            speed_mps: DEFAULT_PROJECTILE_SPEED_MPS,
            damage: DEFAULT_PROJECTILE_DAMAGE,
            range_m: DEFAULT_PROJECTILE_RANGE_M,
        }
    }
}

/// Parameters for the next shot.
///
/// Armed units fire their first ready weapon and hold fire while every slot
/// is reloading or empty. Units without slots, or whose weapon is unknown to
/// the table, fire the default bullet.
pub fn fire_parameters(unit: &Unit, weapons: &WeaponTable) -> Option<ShotParameters> {
    if unit.weapons.is_empty() {
        return Some(ShotParameters::default_bullet(None));
    }
    let (index, slot) = unit.ready_weapon()?;
    let shot = match weapons.weapon(&slot.weapon_id) {
        Some(weapon) => ShotParameters {
            slot: Some(index),
            kind: weapon.projectile_kind(),
            speed_mps: weapon.projectile_speed_mps,
            damage: weapon.damage,
            range_m: weapon.range_m,
        },
        None => ShotParameters::default_bullet(Some(index)),
    };
    Some(shot)
}

/// Heading pointing from the nearest threat (within twice vision range)
/// back through `unit`.
fn heading_away_from_threat(unit: &Unit, world: &WorldState) -> Option<f64> {
    let range = unit.vision_range_m * RETREAT_THREAT_RANGE_FACTOR;
    let (threat, _) = world.nearest_hostile(unit, range)?;
    Some(threat.position.bearing_to(&unit.position))
}

fn random_leg<R: Rng + ?Sized>(unit: &Unit, rng: &mut R) -> Command {
    let heading = rng.gen_range(0.0..360.0);
    let speed = speed_profile(unit.category()).cruise;
    Command::Move(MoveCommand::heading_and_speed(unit.id, heading, speed))
}
