//! Arena Shooter — a small real-time shooter for the terminal.
//!
//! - `geometry`: rectangles and the overlap test
//! - `entities`: player, projectiles, enemies and the game state
//! - `compute`: the simulation rules and the per-tick step
//! - `input`: held-key tracking and controls
//! - `display`: terminal rendering
//! - `config`: tunable values, optionally loaded from TOML
//! - `error`: setup and I/O failures that end the program

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;

pub use config::GameConfig;
pub use error::GameError;
