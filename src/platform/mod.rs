//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, swipes) translated to headings
//! - Viewport size queries

pub mod input;

pub use input::{SwipeTracker, heading_for_key, heading_for_swipe};

/// Supplies the pixel area available to the playfield
pub trait ViewportSizeProvider {
    /// Current `(width, height)` in CSS pixels
    fn viewport_size(&self) -> (u32, u32);
}

/// Viewport of a fixed size (native/headless runs, tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport {
    pub width: u32,
    pub height: u32,
}

impl FixedViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ViewportSizeProvider for FixedViewport {
    fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
