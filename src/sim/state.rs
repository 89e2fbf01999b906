//! Run state and tick results

use serde::{Deserialize, Serialize};

use super::level::Theme;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended
    GameOver,
}

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

/// Per-run counters. Frozen once `alive` turns false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u32,
    /// 1-based level
    pub level: u32,
    /// Delay before the next tick
    pub tick_interval_ms: u32,
    pub alive: bool,
}

impl RunState {
    pub fn new(tick_interval_ms: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            tick_interval_ms,
            alive: true,
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved and the run goes on
    Continued {
        score: u32,
        level: u32,
        tick_interval_ms: u32,
        ate_food: bool,
        /// Set when this tick's score crossed into a new level
        level_up: Option<Theme>,
    },
    /// The run ended this tick
    Collided(CollisionKind),
    /// Tick requested while no run is active; nothing changed
    Halted,
}

impl TickOutcome {
    /// Whether the scheduler should keep ticking
    pub fn is_continued(&self) -> bool {
        matches!(self, TickOutcome::Continued { .. })
    }
}
