use thiserror::Error;

use warsim_ai::AiError;
use warsim_core::error::SimError;

/// Anything that can go wrong while advancing a single unit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitFault {
    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Kinematics(#[from] SimError),
}
