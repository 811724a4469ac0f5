//! Error types shared by the simulation crates.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ProjectileId, UnitId};

/// Failure to load a configuration table.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-entity fault during a tick. Never fatal to the tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("{unit} produced non-finite kinematics (heading {heading}, speed {speed_mps} m/s)")]
    UnitKinematics {
        unit: UnitId,
        heading: f64,
        speed_mps: f64,
    },

    #[error("{projectile} produced non-finite kinematics (heading {heading}, speed {speed_mps} m/s)")]
    ProjectileKinematics {
        projectile: ProjectileId,
        heading: f64,
        speed_mps: f64,
    },
}
