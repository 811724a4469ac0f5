//! Core types and definitions for the WARSIM simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! units, projectiles, factions, world snapshots, commands, events,
//! configuration tables and constants. It has no dependency on the
//! tick engine or any host runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
