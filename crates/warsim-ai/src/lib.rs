//! Unit AI for WARSIM.
//!
//! A five-state behavior machine (Idle, Patrol, Engage, Retreat, Rearm)
//! driven by per-unit contexts and configurable behavior profiles, plus a
//! stateless fallback behavior. Everything here reads a frozen snapshot and
//! emits commands; nothing touches the world state directly.

pub mod context;
pub mod controller;
pub mod error;
pub mod fsm;
pub mod profiles;
pub mod simple;

pub use warsim_core as core;

pub use context::AiContext;
pub use controller::{AiController, Checkout};
pub use error::AiError;
pub use fsm::ShotParameters;
pub use profiles::{BehaviorProfile, BehaviorTable};
