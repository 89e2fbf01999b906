//! Fixed-tick simulation engine
//!
//! Advances the snake one cell per tick and resolves walls, self-collision,
//! food and level progression. The engine owns every piece of per-run state;
//! the caller only queues headings, ticks, and schedules the next tick using
//! the returned interval.

use super::food::FoodSpawner;
use super::grid::{Cell, GridSize};
use super::level::{LevelTable, ScoreProgression, Theme};
use super::snake::{Heading, Snake};
use super::state::{CollisionKind, GamePhase, RunState, TickOutcome};
use crate::consts::{FOOD_REWARD, INITIAL_SNAKE_LENGTH};

/// The game simulation
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    grid: GridSize,
    phase: GamePhase,
    run: RunState,
    snake: Snake,
    food: Cell,
    spawner: FoodSpawner,
    progression: ScoreProgression,
    /// Bumped by every `start_run`; lets schedulers drop stale callbacks
    run_id: u64,
    /// Ticks advanced in the current run
    ticks: u64,
}

impl SimulationEngine {
    /// Create an idle engine with the default level table
    pub fn new(grid: GridSize, seed: u64) -> Self {
        Self::with_levels(grid, seed, LevelTable::default())
    }

    pub fn with_levels(grid: GridSize, seed: u64, levels: LevelTable) -> Self {
        let progression = ScoreProgression::new(levels);
        let snake = Snake::new(grid.center(), Heading::Right, INITIAL_SNAKE_LENGTH);
        let mut spawner = FoodSpawner::new(seed);
        let food = spawner.spawn(grid, |c| snake.occupies(c));
        Self {
            grid,
            phase: GamePhase::Idle,
            run: RunState::new(progression.tick_interval_ms()),
            snake,
            food,
            spawner,
            progression,
            run_id: 0,
            ticks: 0,
        }
    }

    /// Start a run from an explicit snake and food cell, skipping the
    /// default layout.
    ///
    /// Scenario constructor: `food` is taken as given, with no check that it
    /// lies inside `grid` or off the snake. A food cell under the body can
    /// only be eaten once that segment has moved away.
    pub fn from_parts(grid: GridSize, snake: Snake, food: Cell, seed: u64) -> Self {
        let mut engine = Self::new(grid, seed);
        engine.begin(snake);
        engine.food = food;
        engine
    }

    /// Reset all per-run state and enter `Running`.
    ///
    /// Valid from any phase.
    pub fn start_run(&mut self) {
        let snake = Snake::new(self.grid.center(), Heading::Right, INITIAL_SNAKE_LENGTH);
        self.begin(snake);
        self.food = self.spawn_food();
        log::info!(
            "Run {} started on {}x{} grid",
            self.run_id,
            self.grid.width,
            self.grid.height
        );
    }

    fn begin(&mut self, snake: Snake) {
        self.run_id += 1;
        self.ticks = 0;
        self.snake = snake;
        self.progression.reset();
        self.run = RunState::new(self.progression.tick_interval_ms());
        self.phase = GamePhase::Running;
    }

    /// Queue a heading for the next tick. Ignored unless running.
    pub fn request_heading(&mut self, heading: Heading) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.snake.set_pending_heading(heading)
    }

    /// Replace the grid. Boundary checks use it from the next tick on.
    pub fn set_grid(&mut self, grid: GridSize) {
        if grid == self.grid {
            return;
        }
        log::debug!("Grid resized to {}x{}", grid.width, grid.height);
        self.grid = grid;
        if !grid.contains(self.food) {
            self.food = self.spawn_food();
        }
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Halted;
        }

        let candidate = self.snake.apply_pending();

        if !self.grid.contains(candidate) {
            return self.end_run(CollisionKind::Wall);
        }

        let eats = candidate == self.food;
        if self.snake.would_bite(candidate, eats) {
            return self.end_run(CollisionKind::SelfCollision);
        }

        self.snake.step_to(candidate, eats);
        self.ticks += 1;

        let mut level_up = None;
        if eats {
            self.run.score = self.run.score.saturating_add(FOOD_REWARD);
            if let Some(up) = self.progression.on_score_changed(self.run.score) {
                self.run.level = up.level;
                self.run.tick_interval_ms = up.tick_interval_ms;
                level_up = Some(up.theme);
            }
            self.food = self.spawn_food();
            log::debug!(
                "Ate food at ({}, {}), score {}, length {}",
                candidate.x,
                candidate.y,
                self.run.score,
                self.snake.len()
            );
        }

        TickOutcome::Continued {
            score: self.run.score,
            level: self.run.level,
            tick_interval_ms: self.run.tick_interval_ms,
            ate_food: eats,
            level_up,
        }
    }

    fn end_run(&mut self, kind: CollisionKind) -> TickOutcome {
        self.phase = GamePhase::GameOver;
        self.run.alive = false;
        log::info!(
            "Run {} over ({:?}) after {} ticks: score {}, level {}",
            self.run_id,
            kind,
            self.ticks,
            self.run.score,
            self.run.level
        );
        TickOutcome::Collided(kind)
    }

    fn spawn_food(&mut self) -> Cell {
        let snake = &self.snake;
        self.spawner.spawn(self.grid, |c| snake.occupies(c))
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    /// Final counters of the last run, once it is over
    pub fn final_snapshot(&self) -> Option<RunState> {
        (self.phase == GamePhase::GameOver).then_some(self.run)
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn theme(&self) -> Theme {
        self.progression.theme()
    }

    pub fn levels(&self) -> &LevelTable {
        self.progression.table()
    }

    /// Delay the scheduler should wait before the next tick
    pub fn tick_interval_ms(&self) -> u32 {
        self.run.tick_interval_ms
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Cell) {
        self.food = food;
    }
}
