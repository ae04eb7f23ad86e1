//! Grid selection with edge wraparound

use serde::{Deserialize, Serialize};

use crate::consts::{CELL_COUNT, GRID_SIDE};
use crate::{cell_to_row_col, row_col_to_cell};

/// Directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a key name (WASD or arrows) to a direction
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "up" | "arrowup" => Some(Direction::Up),
            "s" | "down" | "arrowdown" => Some(Direction::Down),
            "a" | "left" | "arrowleft" => Some(Direction::Left),
            "d" | "right" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Neighbour of `cell` in `dir`, wrapping at the grid edges
pub fn step(cell: usize, dir: Direction) -> usize {
    let (row, col) = cell_to_row_col(cell);
    let last = GRID_SIDE - 1;
    let (row, col) = match dir {
        Direction::Left => (row, if col == 0 { last } else { col - 1 }),
        Direction::Right => (row, if col == last { 0 } else { col + 1 }),
        Direction::Up => (if row == 0 { last } else { row - 1 }, col),
        Direction::Down => (if row == last { 0 } else { row + 1 }, col),
    };
    row_col_to_cell(row, col)
}

/// Edge-triggered press counters, cleared every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buttons {
    downs: [u8; 4],
}

impl Buttons {
    pub fn press(&mut self, dir: Direction) {
        let slot = &mut self.downs[dir.index()];
        *slot = slot.saturating_add(1);
    }

    pub fn downs(&self, dir: Direction) -> u8 {
        self.downs[dir.index()]
    }

    pub fn clear(&mut self) {
        self.downs = [0; 4];
    }
}

/// Current and pending selection
///
/// Input only writes `pending`; the tick promotes it to `current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSelector {
    current: usize,
    pending: usize,
}

impl GridSelector {
    pub fn new(cell: usize) -> Self {
        let cell = cell.min(CELL_COUNT - 1);
        Self {
            current: cell,
            pending: cell,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Target the neighbour of the current cell
    ///
    /// Repeated presses before a tick all step from `current`, so only the
    /// last one counts.
    pub fn handle_direction(&mut self, dir: Direction) {
        self.pending = step(self.current, dir);
    }

    /// Promote a pending change; returns `(old, new)` when one happened
    pub fn take_change(&mut self) -> Option<(usize, usize)> {
        if self.pending == self.current {
            return None;
        }
        let old = self.current;
        self.current = self.pending;
        Some((old, self.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_from_top_left() {
        assert_eq!(step(0, Direction::Left), 2);
        assert_eq!(step(0, Direction::Up), 6);
        assert_eq!(step(0, Direction::Right), 1);
        assert_eq!(step(0, Direction::Down), 3);
    }

    #[test]
    fn test_wrap_from_bottom_right() {
        assert_eq!(step(8, Direction::Right), 6);
        assert_eq!(step(8, Direction::Down), 2);
        assert_eq!(step(8, Direction::Left), 7);
        assert_eq!(step(8, Direction::Up), 5);
    }

    #[test]
    fn test_pending_applies_only_on_take() {
        let mut sel = GridSelector::new(4);
        sel.handle_direction(Direction::Left);
        assert_eq!(sel.current(), 4);
        assert_eq!(sel.pending(), 3);
        assert_eq!(sel.take_change(), Some((4, 3)));
        assert_eq!(sel.current(), 3);
        assert_eq!(sel.take_change(), None);
    }

    #[test]
    fn test_presses_between_ticks_step_from_current() {
        let mut sel = GridSelector::new(4);
        sel.handle_direction(Direction::Left);
        sel.handle_direction(Direction::Left);
        assert_eq!(sel.pending(), 3);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Direction::from_key_name("W"), Some(Direction::Up));
        assert_eq!(Direction::from_key_name("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key_name("space"), None);
    }

    #[test]
    fn test_buttons_clear() {
        let mut b = Buttons::default();
        b.press(Direction::Down);
        b.press(Direction::Down);
        assert_eq!(b.downs(Direction::Down), 2);
        b.clear();
        assert_eq!(b.downs(Direction::Down), 0);
    }

    proptest! {
        #[test]
        fn prop_step_stays_on_grid_and_is_reversible(cell in 0usize..9, d in 0usize..4) {
            let dir = Direction::ALL[d];
            let next = step(cell, dir);
            prop_assert!(next < CELL_COUNT);
            let back = match dir {
                Direction::Up => Direction::Down,
                Direction::Down => Direction::Up,
                Direction::Left => Direction::Right,
                Direction::Right => Direction::Left,
            };
            prop_assert_eq!(step(next, back), cell);
        }

        #[test]
        fn prop_three_steps_return_home(cell in 0usize..9, d in 0usize..4) {
            let dir = Direction::ALL[d];
            prop_assert_eq!(step(step(step(cell, dir), dir), dir), cell);
        }
    }
}
