use thiserror::Error;

use warsim_core::types::UnitId;

/// Per-unit AI failure. The engine restores the unit and its context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiError {
    #[error("{unit} has a non-finite position")]
    InvalidPosition { unit: UnitId },

    #[error("time step {dt} is not a finite non-negative duration")]
    InvalidTimeStep { dt: f64 },
}
