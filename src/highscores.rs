//! High score leaderboard system
//!
//! Persisted through a `KeyValueStore`, tracks the top 3 scores.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HIGH_SCORES, MAX_NAME_LEN};
use crate::persistence::{self, KeyValueStore, StoreError};

/// Name recorded when the player leaves the field blank
pub const DEFAULT_NAME: &str = "Anonymous";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name
    pub name: String,
    /// Player's score
    pub score: u32,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key for the leaderboard record
    pub const STORAGE_KEY: &'static str = "neon_snake_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from a possibly unsorted, oversized or hand-edited list
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        // Stable: equal scores keep their recorded order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        for entry in &mut entries {
            entry.name = sanitize_name(&entry.name);
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if a score qualifies for the leaderboard
    pub fn is_high_score(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must strictly beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.is_high_score(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard.
    ///
    /// Ties rank below entries already holding that score. Returns the rank
    /// achieved (1-indexed) or None if the entry fell off the end.
    pub fn add_score(&mut self, name: &str, score: u32) -> Option<usize> {
        let entry = HighScoreEntry {
            name: sanitize_name(name),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < self.entries.len()).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores; absent or corrupt records give an empty board
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json::<Vec<HighScoreEntry>>(store, Self::STORAGE_KEY) {
            Some(entries) => {
                let scores = Self::from_entries(entries);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        persistence::save_json(store, Self::STORAGE_KEY, &self.entries)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Trim, cap at `MAX_NAME_LEN` chars, and substitute a default for blanks
pub fn sanitize_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn scores(board: &HighScores) -> Vec<u32> {
        board.entries().iter().map(|e| e.score).collect()
    }

    fn names(board: &HighScores) -> Vec<&str> {
        board.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_insertion_order() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score("A", 30), Some(1));
        assert_eq!(board.add_score("B", 10), Some(2));
        assert_eq!(board.add_score("C", 50), Some(1));
        assert_eq!(names(&board), vec!["C", "A", "B"]);
        assert_eq!(scores(&board), vec![50, 30, 10]);
    }

    #[test]
    fn test_is_high_score_when_full() {
        let mut board = HighScores::new();
        assert!(board.is_high_score(0));
        board.add_score("A", 50);
        board.add_score("B", 30);
        board.add_score("C", 10);
        assert!(!board.is_high_score(10));
        assert!(board.is_high_score(11));
        assert_eq!(board.potential_rank(10), None);
        assert_eq!(board.potential_rank(31), Some(2));
    }

    #[test]
    fn test_full_board_drops_lowest() {
        let mut board = HighScores::new();
        board.add_score("A", 50);
        board.add_score("B", 30);
        board.add_score("C", 10);
        assert_eq!(board.add_score("D", 40), Some(2));
        assert_eq!(names(&board), vec!["A", "D", "B"]);
        assert_eq!(board.add_score("E", 5), None);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_loaded_names_sanitized() {
        let mut store = MemoryStore::new();
        let long = "x".repeat(500);
        let raw = format!(r#"[{{"name":"{long}","score":40}},{{"name":"   ","score":20}}]"#);
        store.set(HighScores::STORAGE_KEY, &raw).unwrap();

        let board = HighScores::load(&store);
        assert_eq!(names(&board), vec!["x".repeat(MAX_NAME_LEN).as_str(), DEFAULT_NAME]);
        assert_eq!(scores(&board), vec![40, 20]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = HighScores::new();
        board.add_score("first", 20);
        board.add_score("second", 20);
        assert_eq!(names(&board), vec!["first", "second"]);
    }

    #[test]
    fn test_name_sanitizing() {
        assert_eq!(sanitize_name("  Ada  "), "Ada");
        assert_eq!(sanitize_name("   "), DEFAULT_NAME);
        assert_eq!(sanitize_name("abcdefghijklmnopq"), "abcdefghijkl");
        assert_eq!(sanitize_name("abcdefghijk mno"), "abcdefghijk");
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        board.add_score("A", 30);
        board.add_score("C", 50);
        board.save(&mut store).unwrap();

        let raw = store.get(HighScores::STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"[{"name":"C","score":50},{"name":"A","score":30}]"#);
        assert_eq!(HighScores::load(&store), board);
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let mut store = MemoryStore::new();
        store.set(HighScores::STORAGE_KEY, "{\"oops\": ").unwrap();
        assert!(HighScores::load(&store).is_empty());
        store.set(HighScores::STORAGE_KEY, r#"[{"name":"A","score":-4}]"#).unwrap();
        assert!(HighScores::load(&store).is_empty());
    }

    #[test]
    fn test_load_normalizes_record() {
        let mut store = MemoryStore::new();
        store
            .set(
                HighScores::STORAGE_KEY,
                r#"[{"name":"a","score":1},{"name":"b","score":9},{"name":"c","score":5},{"name":"d","score":7}]"#,
            )
            .unwrap();
        let board = HighScores::load(&store);
        assert_eq!(scores(&board), vec![9, 7, 5]);
    }

    proptest! {
        #[test]
        fn prop_board_bounded_and_sorted(adds in proptest::collection::vec(0u32..1000, 0..30)) {
            let mut board = HighScores::new();
            for (i, score) in adds.iter().enumerate() {
                let qualified = board.is_high_score(*score);
                let rank = board.add_score(&format!("p{i}"), *score);
                prop_assert_eq!(rank.is_some(), qualified);
                prop_assert!(board.len() <= MAX_HIGH_SCORES);
                let s = scores(&board);
                prop_assert!(s.windows(2).all(|w| w[0] >= w[1]));
            }
        }
    }
}
