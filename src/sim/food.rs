//! Food placement

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Cell, GridSize};
use crate::consts::MAX_SPAWN_ATTEMPTS;

/// Cell used when no free cell was found within the attempt budget
pub const FALLBACK_CELL: Cell = IVec2::ZERO;

/// Picks food cells with a seeded RNG
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    rng: Pcg32,
}

impl FoodSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Sample a random cell not covered by `is_occupied`.
    ///
    /// Gives up after `MAX_SPAWN_ATTEMPTS` and returns `FALLBACK_CELL`, which
    /// may lie under the snake. Callers treat such food as available once the
    /// segment moves off it.
    pub fn spawn(&mut self, grid: GridSize, is_occupied: impl Fn(Cell) -> bool) -> Cell {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = IVec2::new(
                self.rng.random_range(0..grid.width),
                self.rng.random_range(0..grid.height),
            );
            if !is_occupied(candidate) {
                return candidate;
            }
        }

        log::warn!(
            "No free food cell after {} attempts on {}x{} grid, using fallback",
            MAX_SPAWN_ATTEMPTS,
            grid.width,
            grid.height
        );
        FALLBACK_CELL
    }
}
