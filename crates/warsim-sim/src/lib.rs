//! Simulation engine for WARSIM.
//!
//! Owns the world state store, the projectile pools and the AI contexts,
//! and advances the world one tick at a time. Completely headless: hosts
//! drive `SimulationEngine::tick` from whatever loop they like.

pub mod engine;
pub mod error;
pub mod factory;
pub mod store;
pub mod systems;
pub mod tables;
pub mod world_setup;

pub use warsim_core as core;
pub use engine::{AiMode, SimConfig, SimulationEngine};
pub use factory::{PoolStats, ProjectileFactory};
pub use store::WorldStore;
pub use tables::SimTables;
