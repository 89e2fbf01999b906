//! Game settings and preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::consts::{SWIPE_THRESHOLD_PX, TILE_SIZE};
use crate::persistence::{self, KeyValueStore, StoreError};

/// Smallest tile size accepted from a settings record
pub const MIN_TILE_SIZE: u32 = 8;
/// Largest tile size accepted from a settings record
pub const MAX_TILE_SIZE: u32 = 64;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Pixel size of a grid tile
    pub tile_size: u32,
    /// Fixed RNG seed for food placement (None = seed from the clock)
    pub seed: Option<u64>,

    // === Input ===
    /// Minimum swipe length (px) that counts as a turn
    pub swipe_threshold: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all sound
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            seed: None,

            swipe_threshold: SWIPE_THRESHOLD_PX,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Storage key for the settings record
    pub const STORAGE_KEY: &'static str = "neon_snake_settings";

    /// Clamp values a hand-edited record could push out of range
    pub fn sanitized(mut self) -> Self {
        self.tile_size = self.tile_size.clamp(MIN_TILE_SIZE, MAX_TILE_SIZE);
        self.master_volume = clamp_unit(self.master_volume);
        self.sfx_volume = clamp_unit(self.sfx_volume);
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            self.swipe_threshold = SWIPE_THRESHOLD_PX;
        }
        self
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json::<Settings>(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        persistence::save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 }
}
