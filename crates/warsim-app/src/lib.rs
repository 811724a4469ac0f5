//! Headless host for the WARSIM engine: settings, engine wiring and the
//! fixed-rate tick loop.

pub mod game_loop;
pub mod settings;

use std::sync::Arc;

use warsim_core::events::EventSink;
use warsim_sim::{world_setup, SimConfig, SimTables, SimulationEngine, WorldStore};

use crate::settings::Settings;

/// Load tables, seed the demo scenario and build an engine around it.
pub fn build_engine(settings: &Settings, events: Arc<dyn EventSink>) -> SimulationEngine {
    let tables = SimTables::load(&settings.config_dir);
    let initial = world_setup::demo_skirmish(&tables.weapons);
    tracing::info!(
        units = initial.units.len(),
        factions = initial.factions.len(),
        seed = settings.seed,
        "scenario loaded"
    );

    let store = Arc::new(WorldStore::new(initial));
    let config = SimConfig {
        seed: settings.seed,
        ..SimConfig::default()
    };
    SimulationEngine::new(config, store, tables, events)
}
