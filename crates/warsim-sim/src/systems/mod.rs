//! Per-entity systems run by the engine each tick.
//!
//! Systems are plain functions over units and projectiles. They own no
//! state; the engine decides which copy of the world they operate on.

pub mod combat;
pub mod movement;
pub mod weapons;
