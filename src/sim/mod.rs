//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One grid step per tick, no wall-clock reads
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod engine;
pub mod food;
pub mod grid;
pub mod level;
pub mod snake;
pub mod state;

pub use engine::SimulationEngine;
pub use food::FoodSpawner;
pub use grid::{Cell, GridSize};
pub use level::{LEVELS, LevelEntry, LevelTable, LevelTableError, LevelUp, ScoreProgression, Theme};
pub use snake::{Heading, Snake};
pub use state::{CollisionKind, GamePhase, RunState, TickOutcome};
