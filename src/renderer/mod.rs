//! Rendering module
//!
//! The simulation hands the renderer a `Frame` snapshot after every tick and
//! on explicit redraws. Renderers only read it; nothing flows back into the
//! simulation.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{TileRect, frame_tiles};

use crate::sim::{Cell, GridSize, SimulationEngine, Snake, Theme};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub snake: &'a Snake,
    pub food: Cell,
    pub theme: Theme,
    pub grid: GridSize,
    /// Pixel size of one tile
    pub tile_size: u32,
    pub score: u32,
    pub level: u32,
}

impl<'a> Frame<'a> {
    /// Snapshot the engine's current state
    pub fn from_engine(engine: &'a SimulationEngine, tile_size: u32) -> Self {
        let run = engine.run_state();
        Self {
            snake: engine.snake(),
            food: engine.food(),
            theme: engine.theme(),
            grid: engine.grid(),
            tile_size,
            score: run.score,
            level: run.level,
        }
    }
}

/// Draws frames
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        log::trace!(
            "frame: head ({}, {}), len {}, score {}",
            frame.snake.head().x,
            frame.snake.head().y,
            frame.snake.len(),
            frame.score
        );
    }
}
