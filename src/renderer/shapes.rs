//! Tile geometry for a frame

use super::Frame;

/// Colour of the snake's head on every level
pub const HEAD_COLOR: &str = "#ffffff";
/// Background fill
pub const BACKGROUND_COLOR: &str = "#1a1a24";
/// Gap left between neighbouring tiles (px)
pub const TILE_GAP: u32 = 2;

/// A filled, glowing square in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: &'static str,
    /// Glow colour (canvas shadow)
    pub glow: &'static str,
}

fn tile(frame: &Frame<'_>, x: i32, y: i32, color: &'static str, glow: &'static str) -> TileRect {
    let ts = frame.tile_size as f64;
    TileRect {
        x: x as f64 * ts,
        y: y as f64 * ts,
        size: (frame.tile_size.saturating_sub(TILE_GAP)).max(1) as f64,
        color,
        glow,
    }
}

/// Rectangles to draw, back to front: food, then the snake tail-to-head so
/// the head stays on top
pub fn frame_tiles(frame: &Frame<'_>) -> Vec<TileRect> {
    let theme = frame.theme;
    let mut tiles = Vec::with_capacity(frame.snake.len() + 1);
    tiles.push(tile(frame, frame.food.x, frame.food.y, theme.food, theme.food));

    let cells: Vec<_> = frame.snake.cells().collect();
    for (i, c) in cells.iter().enumerate().rev() {
        let color = if i == 0 { HEAD_COLOR } else { theme.snake };
        tiles.push(tile(frame, c.x, c.y, color, theme.snake));
    }
    tiles
}
