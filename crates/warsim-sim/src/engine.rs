//! Simulation engine: one tick is snapshot, fan-out, merge, collide, publish.
//!
//! Units and projectiles are cloned out of the published snapshot and
//! advanced in parallel; every decision reads the frozen snapshot, never a
//! neighbour's working copy. Commands gathered during fan-out are applied
//! serially in unit order, so a tick's outcome depends only on the prior
//! state, the seed and `dt`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use warsim_ai::fsm::{self, Situation};
use warsim_ai::{simple, AiContext, AiController};
use warsim_core::commands::{Command, FireCommand, MoveCommand};
use warsim_core::components::{Projectile, Unit};
use warsim_core::enums::UnitStatus;
use warsim_core::events::{EntityRef, EventSink, RecordingSink, SimEvent};
use warsim_core::state::WorldState;
use warsim_core::types::UnitId;

use crate::error::UnitFault;
use crate::factory::ProjectileFactory;
use crate::store::WorldStore;
use crate::systems::{combat, movement, weapons};
use crate::tables::SimTables;

/// Which decision layer drives the units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AiMode {
    #[default]
    StateMachine,
    /// Stateless wander-and-shoot plus random opportunistic fire.
    Simple,
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub ai_mode: AiMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ai_mode: AiMode::StateMachine,
        }
    }
}

/// Independent random streams derived for each unit and tick.
const AI_STREAM: u64 = 0;
const WEAPON_STREAM: u64 = 1;

pub struct SimulationEngine {
    config: SimConfig,
    store: Arc<WorldStore>,
    tables: SimTables,
    ai: AiController,
    factory: ProjectileFactory,
    events: Arc<dyn EventSink>,
}

impl SimulationEngine {
    pub fn new(
        config: SimConfig,
        store: Arc<WorldStore>,
        tables: SimTables,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let ai = AiController::new(tables.behaviors.clone());
        Self {
            config,
            store,
            tables,
            ai,
            factory: ProjectileFactory::new(),
            events,
        }
    }

    pub fn config(&self) -> SimConfig {
        self.config
    }

    pub fn store(&self) -> &Arc<WorldStore> {
        &self.store
    }

    pub fn tables(&self) -> &SimTables {
        &self.tables
    }

    pub fn ai(&self) -> &AiController {
        &self.ai
    }

    pub fn factory(&self) -> &ProjectileFactory {
        &self.factory
    }

    /// Advance the world by `dt` seconds and publish the result.
    pub fn tick(&mut self, dt: f64) -> Arc<WorldState> {
        let started = Instant::now();
        let snapshot = self.store.get_snapshot();
        let events = self.events.as_ref();

        let mut units: Vec<Unit> = snapshot.units.iter().map(movement::clone_unit).collect();
        let mut projectiles: Vec<Projectile> = snapshot
            .projectiles
            .iter()
            .map(movement::clone_projectile)
            .collect();

        let checkout = self.ai.checkout(&units);
        if checkout.evicted > 0 {
            tracing::debug!(evicted = checkout.evicted, "ai contexts evicted");
        }
        let mut contexts = checkout.contexts;

        // --- Fan-out ---
        let situation = Situation {
            world: &snapshot,
            weapons: &self.tables.weapons,
            events,
            dt,
        };
        let (seed, tick, mode) = (self.config.seed, snapshot.tick, self.config.ai_mode);
        let pending: Vec<Vec<Command>> = units
            .par_iter_mut()
            .zip(contexts.par_iter_mut())
            .map(|(unit, ctx)| {
                let mut rng = entity_rng(seed, tick, unit.id, AI_STREAM);
                advance_unit(unit, ctx, &situation, mode, &mut rng)
            })
            .collect();

        projectiles.par_iter_mut().for_each(|projectile| {
            if let Err(fault) = movement::update_projectile_movement(projectile, dt) {
                events.emit(SimEvent::EntityFault {
                    entity: EntityRef::Projectile(projectile.id),
                    message: fault.to_string(),
                });
            }
        });

        // --- Merge ---
        let index: HashMap<UnitId, usize> = units
            .iter()
            .enumerate()
            .map(|(i, unit)| (unit.id, i))
            .collect();

        for command in pending.into_iter().flatten() {
            match command {
                Command::Move(cmd) => self.apply_move(&mut units, &index, cmd),
                Command::Fire(cmd) => {
                    if let Some(projectile) = self.apply_fire(&mut units, &index, cmd) {
                        projectiles.push(projectile);
                    }
                }
            }
        }

        if mode == AiMode::Simple {
            for unit in &units {
                let mut rng = entity_rng(seed, tick, unit.id, WEAPON_STREAM);
                if let Some(projectile) = weapons::try_fire(unit, &self.factory, &mut rng) {
                    events.emit(SimEvent::ProjectileFired {
                        shooter: unit.id,
                        projectile: projectile.id,
                        kind: projectile.kind(),
                        target: None,
                    });
                    projectiles.push(projectile);
                }
            }
        }

        // --- Collide ---
        let survivors = combat::process_projectiles(
            projectiles,
            &mut units,
            &snapshot.factions,
            &self.factory,
            &self.tables.damage,
            events,
        );

        // --- Publish ---
        self.ai.checkin(
            units
                .iter()
                .map(|unit| unit.id)
                .zip(contexts)
                .filter_map(|(id, ctx)| ctx.map(|ctx| (id, ctx))),
        );

        let next = Arc::new(WorldState::new(
            units,
            survivors,
            snapshot.factions.clone(),
            snapshot.tick + 1,
        ));
        self.store.publish(Arc::clone(&next));

        events.emit(SimEvent::TickCompleted {
            tick: next.tick,
            units: next.units.len(),
            projectiles: next.projectiles.len(),
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        });
        next
    }

    fn apply_move(&self, units: &mut [Unit], index: &HashMap<UnitId, usize>, cmd: MoveCommand) {
        let Some(&i) = index.get(&cmd.unit) else {
            self.drop_command(cmd.unit, "unit not found");
            return;
        };
        let unit = &mut units[i];
        if unit.is_destroyed() {
            self.drop_command(cmd.unit, "unit destroyed");
            return;
        }
        if let Some(heading) = cmd.heading {
            unit.heading = heading;
        }
        if let Some(position) = cmd.position {
            unit.position = position;
        }
        if let Some(speed) = cmd.speed {
            unit.kind.set_native_speed(speed);
        }
        unit.status = UnitStatus::Moving;
    }

    fn apply_fire(
        &self,
        units: &mut [Unit],
        index: &HashMap<UnitId, usize>,
        cmd: FireCommand,
    ) -> Option<Projectile> {
        let Some(&i) = index.get(&cmd.unit) else {
            self.drop_command(cmd.unit, "shooter not found");
            return None;
        };
        let shooter = &mut units[i];
        if shooter.is_destroyed() {
            self.drop_command(cmd.unit, "shooter destroyed");
            return None;
        }
        if !shooter.consume_round(cmd.slot) {
            self.drop_command(cmd.unit, "no ammunition ready");
            return None;
        }

        let projectile = self.factory.create(&cmd, shooter.position);
        self.events.emit(SimEvent::ProjectileFired {
            shooter: cmd.unit,
            projectile: projectile.id,
            kind: cmd.kind,
            target: cmd.target,
        });
        Some(projectile)
    }

    fn drop_command(&self, unit: UnitId, reason: &str) {
        self.events.emit(SimEvent::CommandDropped {
            unit,
            reason: reason.to_string(),
        });
    }
}

/// AI, movement and reload for one unit. On failure the unit and its
/// context are restored to their pre-tick values, no commands are issued and
/// the unit's AI events are discarded along with the tick they describe.
fn advance_unit(
    unit: &mut Unit,
    ctx: &mut Option<AiContext>,
    situation: &Situation<'_>,
    mode: AiMode,
    rng: &mut ChaCha8Rng,
) -> Vec<Command> {
    if unit.is_destroyed() {
        return Vec::new();
    }

    let unit_before = unit.clone();
    let ctx_before = ctx.clone();
    let held = RecordingSink::new();
    let local = Situation {
        events: &held,
        ..*situation
    };

    match try_advance_unit(unit, ctx.as_mut(), &local, mode, rng) {
        Ok(commands) => {
            for event in held.drain() {
                situation.events.emit(event);
            }
            commands
        }
        Err(fault) => {
            *unit = unit_before;
            *ctx = ctx_before;
            situation.events.emit(SimEvent::EntityFault {
                entity: EntityRef::Unit(unit.id),
                message: fault.to_string(),
            });
            Vec::new()
        }
    }
}

fn try_advance_unit(
    unit: &mut Unit,
    ctx: Option<&mut AiContext>,
    situation: &Situation<'_>,
    mode: AiMode,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Command>, UnitFault> {
    let commands = match (mode, ctx) {
        (AiMode::StateMachine, Some(ctx)) => fsm::step(unit, ctx, situation, rng)?,
        (AiMode::StateMachine, None) => Vec::new(),
        (AiMode::Simple, _) => simple::decide(unit, situation.world, rng),
    };
    movement::update_unit_movement(unit, situation.dt)?;
    weapons::advance_reloads(unit, situation.dt);
    Ok(commands)
}

/// Deterministic RNG for one entity in one tick, independent of scheduling.
fn entity_rng(seed: u64, tick: u64, id: UnitId, stream: u64) -> ChaCha8Rng {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&tick.to_le_bytes());
    key[16..24].copy_from_slice(&id.0.to_le_bytes());
    key[24..].copy_from_slice(&stream.to_le_bytes());
    ChaCha8Rng::from_seed(key)
}
