//! Playfield geometry
//!
//! The grid is measured in tiles. Its size follows the viewport, but never
//! shrinks below `MIN_GRID_TILES` on either axis.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_GRID_TILES;

/// A grid cell, `x` to the right, `y` downwards
pub type Cell = IVec2;

/// Playable grid dimensions in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(20, 20)
    }
}

impl GridSize {
    /// Create a grid, clamping each axis to the playable minimum
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(MIN_GRID_TILES),
            height: height.max(MIN_GRID_TILES),
        }
    }

    /// Compute the grid that fits a pixel viewport.
    ///
    /// Partial tiles are dropped. A zero tile size is treated as 1px.
    pub fn from_viewport(viewport_width: u32, viewport_height: u32, tile_size: u32) -> Self {
        let tile = tile_size.max(1);
        let tiles_x = (viewport_width / tile).min(i32::MAX as u32) as i32;
        let tiles_y = (viewport_height / tile).min(i32::MAX as u32) as i32;
        Self::new(tiles_x, tiles_y)
    }

    /// Whether a cell lies inside `[0, width) x [0, height)`
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Centre cell (rounded towards the origin)
    pub fn center(&self) -> Cell {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Pixel size of the grid for a given tile size, saturating at `u32::MAX`
    pub fn pixel_size(&self, tile_size: u32) -> (u32, u32) {
        (
            (self.width as u32).saturating_mul(tile_size),
            (self.height as u32).saturating_mul(tile_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_viewport_exact_fit() {
        let grid = GridSize::from_viewport(400, 400, 20);
        assert_eq!(grid, GridSize { width: 20, height: 20 });
    }

    #[test]
    fn test_from_viewport_drops_partial_tiles() {
        let grid = GridSize::from_viewport(439, 301, 20);
        assert_eq!(grid.width, 21);
        assert_eq!(grid.height, 15);
    }

    #[test]
    fn test_degenerate_viewport_clamped() {
        assert_eq!(GridSize::from_viewport(0, 0, 20), GridSize { width: 10, height: 10 });
        assert_eq!(GridSize::from_viewport(50, 1000, 20), GridSize { width: 10, height: 50 });
        // Zero tile size must not divide by zero
        let grid = GridSize::from_viewport(15, 12, 0);
        assert_eq!(grid, GridSize { width: 15, height: 12 });
    }

    #[test]
    fn test_contains_bounds() {
        let grid = GridSize::new(20, 15);
        assert!(grid.contains(IVec2::new(0, 0)));
        assert!(grid.contains(IVec2::new(19, 14)));
        assert!(!grid.contains(IVec2::new(-1, 5)));
        assert!(!grid.contains(IVec2::new(20, 5)));
        assert!(!grid.contains(IVec2::new(5, 15)));
        assert!(!grid.contains(IVec2::new(5, -1)));
    }

    #[test]
    fn test_center_and_pixels() {
        let grid = GridSize::new(21, 10);
        assert_eq!(grid.center(), IVec2::new(10, 5));
        assert_eq!(grid.cell_count(), 210);
        assert_eq!(grid.pixel_size(20), (420, 200));
        assert_eq!(grid.pixel_size(u32::MAX), (u32::MAX, u32::MAX));
    }
}
