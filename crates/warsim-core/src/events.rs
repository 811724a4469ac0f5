//! Structured events emitted by the engine, the AI and the weapon system.
//!
//! Components never log directly; they push `SimEvent`s into an `EventSink`
//! handed to them. Production wires `TracingSink`, tests use `RecordingSink`.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::enums::{AiStateKind, ProjectileKind};
use crate::types::{ProjectileId, UnitId};

/// Which kind of entity faulted during fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRef {
    Unit(UnitId),
    Projectile(ProjectileId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A fire command materialized a projectile.
    ProjectileFired {
        shooter: UnitId,
        projectile: ProjectileId,
        kind: ProjectileKind,
        target: Option<UnitId>,
    },
    /// A projectile hit a unit that survived.
    UnitHit {
        shooter: UnitId,
        target: UnitId,
        kind: ProjectileKind,
        damage: f64,
        remaining_health: f64,
    },
    /// A projectile reduced a unit's health to zero.
    UnitDestroyed {
        shooter: UnitId,
        target: UnitId,
        kind: ProjectileKind,
        damage: f64,
    },
    /// A projectile used up its flight range without hitting anything.
    ProjectileExpired {
        owner: UnitId,
        projectile: ProjectileId,
        kind: ProjectileKind,
    },
    /// An AI state machine changed state.
    StateTransition {
        unit: UnitId,
        from: AiStateKind,
        to: AiStateKind,
    },
    /// A command referenced a unit that cannot act on it.
    CommandDropped { unit: UnitId, reason: String },
    /// Per-entity processing failed; the entity kept its pre-tick state.
    EntityFault { entity: EntityRef, message: String },
    /// A tick was published.
    TickCompleted {
        tick: u64,
        units: usize,
        projectiles: usize,
        elapsed_ms: f64,
    },
}

/// Receiver for simulation events. Must tolerate concurrent emission from
/// fan-out worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SimEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: SimEvent) {}
}

/// Forwards events to `tracing` with structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: SimEvent) {
        match event {
            SimEvent::ProjectileFired {
                shooter,
                projectile,
                kind,
                target,
            } => tracing::trace!(
                shooter = shooter.0,
                projectile = projectile.0,
                %kind,
                target_unit = target.map(|t| t.0),
                "projectile fired"
            ),
            SimEvent::UnitHit {
                shooter,
                target,
                kind,
                damage,
                remaining_health,
            } => tracing::info!(
                shooter = shooter.0,
                target_unit = target.0,
                %kind,
                damage,
                remaining_health,
                "unit hit"
            ),
            SimEvent::UnitDestroyed {
                shooter,
                target,
                kind,
                damage,
            } => tracing::warn!(
                shooter = shooter.0,
                target_unit = target.0,
                %kind,
                damage,
                "unit destroyed"
            ),
            SimEvent::ProjectileExpired {
                owner,
                projectile,
                kind,
            } => tracing::trace!(
                owner = owner.0,
                projectile = projectile.0,
                %kind,
                "projectile expired"
            ),
            SimEvent::StateTransition { unit, from, to } => {
                tracing::debug!(unit = unit.0, %from, %to, "ai transition")
            }
            SimEvent::CommandDropped { unit, reason } => {
                tracing::debug!(unit = unit.0, %reason, "command dropped")
            }
            SimEvent::EntityFault { entity, message } => {
                tracing::error!(?entity, %message, "entity update failed")
            }
            SimEvent::TickCompleted {
                tick,
                units,
                projectiles,
                elapsed_ms,
            } => tracing::trace!(tick, units, projectiles, elapsed_ms, "tick published"),
        }
    }
}

/// Keeps every event in memory, in emission order. Also used to hold back a
/// unit's events until its tick is known to have succeeded.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SimEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<SimEvent> {
        self.events.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<SimEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: SimEvent) {
        self.events.lock().push(event);
    }
}
