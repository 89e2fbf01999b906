//! Keyboard and touch input translation

use crate::sim::Heading;

/// Map a DOM `KeyboardEvent.key` value to a heading (arrows and WASD)
pub fn heading_for_key(key: &str) -> Option<Heading> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Heading::Up),
        "ArrowDown" | "s" | "S" => Some(Heading::Down),
        "ArrowLeft" | "a" | "A" => Some(Heading::Left),
        "ArrowRight" | "d" | "D" => Some(Heading::Right),
        _ => None,
    }
}

/// Map a swipe vector (screen pixels, `y` down) to a heading.
///
/// The dominant axis wins; ties go to the vertical axis. Swipes shorter than
/// `threshold` on the dominant axis are ignored.
pub fn heading_for_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Heading> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() > dy.abs() {
        if dx.abs() < threshold || dx == 0.0 {
            return None;
        }
        Some(if dx > 0.0 { Heading::Right } else { Heading::Left })
    } else {
        if dy.abs() < threshold || dy == 0.0 {
            return None;
        }
        Some(if dy > 0.0 { Heading::Down } else { Heading::Up })
    }
}

/// Tracks a single touch from start to end
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the touch; returns the swiped heading, if any
    pub fn end(&mut self, x: f32, y: f32, threshold: f32) -> Option<Heading> {
        let (sx, sy) = self.start.take()?;
        heading_for_swipe(x - sx, y - sy, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(heading_for_key("ArrowUp"), Some(Heading::Up));
        assert_eq!(heading_for_key("s"), Some(Heading::Down));
        assert_eq!(heading_for_key("A"), Some(Heading::Left));
        assert_eq!(heading_for_key("ArrowRight"), Some(Heading::Right));
        assert_eq!(heading_for_key("Enter"), None);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        assert_eq!(heading_for_swipe(80.0, 10.0, 30.0), Some(Heading::Right));
        assert_eq!(heading_for_swipe(-80.0, 79.0, 30.0), Some(Heading::Left));
        assert_eq!(heading_for_swipe(5.0, 60.0, 30.0), Some(Heading::Down));
        assert_eq!(heading_for_swipe(-5.0, -60.0, 30.0), Some(Heading::Up));
        // Equal magnitude resolves vertically
        assert_eq!(heading_for_swipe(40.0, -40.0, 30.0), Some(Heading::Up));
    }

    #[test]
    fn test_short_swipes_ignored() {
        assert_eq!(heading_for_swipe(0.0, 0.0, 0.0), None);
        assert_eq!(heading_for_swipe(20.0, 3.0, 30.0), None);
        assert_eq!(heading_for_swipe(f32::NAN, 50.0, 30.0), None);
    }

    #[test]
    fn test_tracker_needs_start() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.end(100.0, 0.0, 30.0), None);
        tracker.begin(10.0, 10.0);
        assert_eq!(tracker.end(100.0, 20.0, 30.0), Some(Heading::Right));
        // Consumed
        assert_eq!(tracker.end(200.0, 20.0, 30.0), None);
    }
}
