//! Snake body and heading

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Direction of travel on the grid (screen coordinates, `y` grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Unit step for this heading
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
            Heading::Right => IVec2::new(1, 0),
        }
    }

    /// The 180-degree reverse
    pub fn reverse(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// True if `other` points straight back along this heading
    pub fn is_reverse_of(self, other: Heading) -> bool {
        self.reverse() == other
    }
}

/// The player's snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    /// Occupied cells, head first
    body: VecDeque<Cell>,
    /// Heading used by the most recent tick
    heading: Heading,
    /// Heading the next tick will apply
    pending: Heading,
}

impl Snake {
    /// Create a straight snake of `length` cells trailing behind `head`
    pub fn new(head: Cell, heading: Heading, length: usize) -> Self {
        let back = -heading.delta();
        let body = (0..length.max(1) as i32).map(|i| head + back * i).collect();
        Self {
            body,
            heading,
            pending: heading,
        }
    }

    /// Build a snake from explicit cells (head first).
    ///
    /// Returns `None` for an empty body.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, heading: Heading) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            heading,
            pending: heading,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Occupied cells, head first
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Heading applied on the last tick
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Heading queued for the next tick
    pub fn pending_heading(&self) -> Heading {
        self.pending
    }

    /// Queue a heading for the next tick.
    ///
    /// A reverse of the applied heading is ignored. Anything else overwrites
    /// the queued heading, so the last valid request before a tick wins.
    /// Returns whether the request was accepted.
    pub fn set_pending_heading(&mut self, heading: Heading) -> bool {
        if self.heading.is_reverse_of(heading) {
            return false;
        }
        self.pending = heading;
        true
    }

    /// Promote the pending heading to applied and return the candidate head
    pub fn apply_pending(&mut self) -> Cell {
        if !self.heading.is_reverse_of(self.pending) {
            self.heading = self.pending;
        }
        self.advance(self.heading.delta())
    }

    /// Head position after one step of `delta`
    pub fn advance(&self, delta: IVec2) -> Cell {
        self.head() + delta
    }

    /// Check `cell` against the body as it is before the move.
    ///
    /// The tail is ignored when it is about to be vacated (no growth this tick).
    pub fn would_bite(&self, cell: Cell, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(checked).any(|&c| c == cell)
    }

    /// Push a new head, dropping the tail unless growing
    pub fn step_to(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: i32, y: i32) -> Cell {
        IVec2::new(x, y)
    }

    #[test]
    fn test_heading_reverse() {
        for h in Heading::ALL {
            assert!(h.is_reverse_of(h.reverse()));
            assert!(!h.is_reverse_of(h));
            assert_eq!(h.delta() + h.reverse().delta(), IVec2::ZERO);
        }
        assert!(!Heading::Up.is_reverse_of(Heading::Left));
    }

    #[test]
    fn test_new_trails_behind_head() {
        let snake = Snake::new(cell(10, 10), Heading::Right, 3);
        let cells: Vec<_> = snake.cells().collect();
        assert_eq!(cells, vec![cell(10, 10), cell(9, 10), cell(8, 10)]);
        assert_eq!(snake.tail(), cell(8, 10));
    }

    #[test]
    fn test_from_cells_rejects_empty() {
        assert!(Snake::from_cells(Vec::new(), Heading::Up).is_none());
    }

    #[test]
    fn test_reverse_of_applied_rejected() {
        let mut snake = Snake::new(cell(5, 5), Heading::Right, 3);
        assert!(!snake.set_pending_heading(Heading::Left));
        assert_eq!(snake.pending_heading(), Heading::Right);
    }

    #[test]
    fn test_last_valid_request_wins() {
        let mut snake = Snake::new(cell(5, 5), Heading::Right, 3);
        assert!(snake.set_pending_heading(Heading::Up));
        // Reverse of pending but not of applied: accepted
        assert!(snake.set_pending_heading(Heading::Down));
        assert!(!snake.set_pending_heading(Heading::Left));
        assert_eq!(snake.pending_heading(), Heading::Down);

        let next = snake.apply_pending();
        assert_eq!(snake.heading(), Heading::Down);
        assert_eq!(next, cell(5, 6));
    }

    #[test]
    fn test_step_grow_and_move() {
        let mut snake = Snake::new(cell(5, 5), Heading::Right, 3);
        snake.step_to(cell(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), cell(4, 5));

        snake.step_to(cell(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), cell(7, 5));
        assert_eq!(snake.tail(), cell(4, 5));
    }

    #[test]
    fn test_tail_excluded_only_when_vacating() {
        // Square loop: head at (5,5), tail at (5,6) right below it
        let snake = Snake::from_cells(
            [cell(5, 5), cell(6, 5), cell(6, 6), cell(5, 6)],
            Heading::Left,
        )
        .unwrap();
        assert!(!snake.would_bite(cell(5, 6), false));
        assert!(snake.would_bite(cell(5, 6), true));
        assert!(snake.would_bite(cell(6, 6), false));
    }
}
