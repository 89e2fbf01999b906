//! Score-driven difficulty progression
//!
//! Each level raises the snake's speed and swaps the colour theme. Levels are
//! looked up from a table sorted by score threshold.

use thiserror::Error;

/// Colours handed to the renderer for the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// CSS colour of the snake body
    pub snake: &'static str,
    /// CSS colour of the food
    pub food: &'static str,
}

/// One row of the progression table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEntry {
    /// Score at which this level starts
    pub threshold: u32,
    /// Delay between ticks while on this level
    pub tick_interval_ms: u32,
    pub theme: Theme,
}

const fn level(threshold: u32, tick_interval_ms: u32, snake: &'static str, food: &'static str) -> LevelEntry {
    LevelEntry {
        threshold,
        tick_interval_ms,
        theme: Theme { snake, food },
    }
}

/// Default progression, ordered by threshold
pub const LEVELS: &[LevelEntry] = &[
    level(0, 100, "#00ff88", "#ff0055"),
    level(50, 90, "#00e5ff", "#ff9f1c"),
    level(120, 80, "#ffd400", "#ff3cac"),
    level(200, 70, "#ff6b00", "#00ff88"),
    level(300, 60, "#bd00ff", "#faff00"),
    level(450, 50, "#ff0055", "#00e5ff"),
];

/// Reasons a custom level table is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelTableError {
    #[error("level table is empty")]
    Empty,
    #[error("first level must start at score 0, found {0}")]
    FirstThresholdNotZero(u32),
    #[error("threshold {current} at level {level} is not above the previous threshold {previous}")]
    NotIncreasing { level: usize, previous: u32, current: u32 },
    #[error("level {0} has a zero tick interval")]
    ZeroInterval(usize),
}

/// Validated progression table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    entries: Vec<LevelEntry>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            entries: LEVELS.to_vec(),
        }
    }
}

impl LevelTable {
    /// Build a table, checking it starts at 0 and strictly increases
    pub fn new(entries: Vec<LevelEntry>) -> Result<Self, LevelTableError> {
        let first = entries.first().ok_or(LevelTableError::Empty)?;
        if first.threshold != 0 {
            return Err(LevelTableError::FirstThresholdNotZero(first.threshold));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.tick_interval_ms == 0 {
                return Err(LevelTableError::ZeroInterval(i + 1));
            }
        }
        for (i, pair) in entries.windows(2).enumerate() {
            if pair[1].threshold <= pair[0].threshold {
                return Err(LevelTableError::NotIncreasing {
                    level: i + 2,
                    previous: pair[0].threshold,
                    current: pair[1].threshold,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LevelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the last entry whose threshold is at or below `score`
    pub fn index_for_score(&self, score: u32) -> usize {
        // First threshold is 0, so the partition point is always >= 1
        self.entries
            .partition_point(|e| e.threshold <= score)
            .saturating_sub(1)
    }

    /// Entry in effect for `score`
    pub fn lookup_level(&self, score: u32) -> &LevelEntry {
        &self.entries[self.index_for_score(score)]
    }

    pub fn entry(&self, index: usize) -> &LevelEntry {
        &self.entries[index.min(self.entries.len() - 1)]
    }
}

/// A level transition reported by `ScoreProgression::on_score_changed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// New 1-based level number
    pub level: u32,
    pub tick_interval_ms: u32,
    pub theme: Theme,
}

/// Tracks the level reached by the current run
#[derive(Debug, Clone)]
pub struct ScoreProgression {
    table: LevelTable,
    index: usize,
}

impl Default for ScoreProgression {
    fn default() -> Self {
        Self::new(LevelTable::default())
    }
}

impl ScoreProgression {
    pub fn new(table: LevelTable) -> Self {
        Self { table, index: 0 }
    }

    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    /// Back to level 1 for a new run
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Current 1-based level number
    pub fn level(&self) -> u32 {
        self.index as u32 + 1
    }

    pub fn current(&self) -> &LevelEntry {
        self.table.entry(self.index)
    }

    pub fn theme(&self) -> Theme {
        self.current().theme
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.current().tick_interval_ms
    }

    /// Re-resolve the level after a score change.
    ///
    /// Returns the transition when the level increased. Levels never go down
    /// within a run.
    pub fn on_score_changed(&mut self, score: u32) -> Option<LevelUp> {
        let resolved = self.table.index_for_score(score);
        if resolved <= self.index {
            return None;
        }
        self.index = resolved;
        let entry = self.current();
        log::info!(
            "Level up: {} (score {}, tick {}ms)",
            self.level(),
            score,
            entry.tick_interval_ms
        );
        Some(LevelUp {
            level: self.level(),
            tick_interval_ms: entry.tick_interval_ms,
            theme: entry.theme,
        })
    }
}
