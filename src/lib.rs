//! Neon Snake - A grid Snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, food, levels, tick engine)
//! - `game`: Session wiring the engine to its collaborators and the tick scheduler
//! - `renderer`: Rendering interface (Canvas 2D on web)
//! - `audio`: Fire-and-forget sound cues (Web Audio on web)
//! - `platform`: Input translation and viewport abstraction
//! - `persistence`: Key/value storage backends
//! - `highscores`: Top-3 leaderboard
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Pixel size of one grid tile
    pub const TILE_SIZE: u32 = 20;
    /// Minimum tiles per axis, regardless of viewport size
    pub const MIN_GRID_TILES: i32 = 10;

    /// Snake length at the start of a run
    pub const INITIAL_SNAKE_LENGTH: usize = 3;
    /// Points awarded per food eaten
    pub const FOOD_REWARD: u32 = 10;
    /// Random placement attempts before the food spawner falls back
    pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

    /// Number of leaderboard entries kept
    pub const MAX_HIGH_SCORES: usize = 3;
    /// Longest player name stored on the leaderboard (chars)
    pub const MAX_NAME_LEN: usize = 12;

    /// Minimum swipe distance (px) recognised as a direction change
    pub const SWIPE_THRESHOLD_PX: f32 = 30.0;
}
