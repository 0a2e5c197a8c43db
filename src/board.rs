//! Grid state and geometry helpers.
//!
//! The board is a `width × height` grid of per-cell durability counters. Every
//! cell starts at 1 and only ever goes down: a live agent leaving a cell
//! decrements it by exactly one, and a cell at 0 or below is exhausted
//! (standing on it is fatal). Arriving on a cell never changes it.

use std::fmt::{self, Display};
use std::ops::Add;

/// A `(row, col)` position on (or off) the board.
///
/// Coordinates are signed so that moves can step off the board; the engine
/// detects that with [`Board::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    /// Row index, 0-based from the top.
    pub row: i32,
    /// Column index, 0-based from the left.
    pub col: i32,
}

impl Coord {
    /// Sentinel reported for agents that are no longer on the board.
    pub const SENTINEL: Coord = Coord { row: -1, col: -1 };

    /// Build a coordinate from row and column indices.
    pub fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord {
            row: self.row + rhs.row,
            col: self.col + rhs.col,
        }
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// The eroding grid.
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<i32>,
}

impl Board {
    /// Create a board with every cell at durability 1.
    pub fn new(width: i32, height: i32) -> Board {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Board {
            width,
            height,
            cells: vec![1; (width * height) as usize],
        }
    }

    /// Board width in columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Board height in rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The four start corners, in the fixed order they are handed out to
    /// joining agents: top-left, bottom-right, top-right, bottom-left.
    pub fn start_corners(&self) -> [Coord; 4] {
        [
            Coord::new(0, 0),
            Coord::new(self.height - 1, self.width - 1),
            Coord::new(0, self.width - 1),
            Coord::new(self.height - 1, 0),
        ]
    }

    /// True iff `coord` lies on the grid.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        (0..self.height).contains(&coord.row) && (0..self.width).contains(&coord.col)
    }

    /// Decrement the durability of the cell an agent just left.
    ///
    /// Multiple agents leaving the same cell in one turn each decrement it
    /// independently.
    pub fn vacate(&mut self, coord: Coord) {
        let idx = self.index(coord);
        self.cells[idx] -= 1;
    }

    /// Durability of the cell at `coord`. `<= 0` means exhausted.
    pub fn durability_at(&self, coord: Coord) -> i32 {
        self.cells[self.index(coord)]
    }

    /// Rows of durability values, for the handshake grid dump.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    fn index(&self, coord: Coord) -> usize {
        debug_assert!(self.in_bounds(coord), "cell access out of bounds: {coord}");
        (coord.row * self.width + coord.col) as usize
    }
}

#[cfg(test)]
mod board_tests {
    use super::*;

    #[test]
    fn new_board_is_all_ones() {
        let board = Board::new(10, 10);
        for r in 0..10 {
            for c in 0..10 {
                assert_eq!(board.durability_at(Coord::new(r, c)), 1);
            }
        }
    }

    #[test]
    fn corners_in_fixed_order() {
        let board = Board::new(7, 5);
        assert_eq!(
            board.start_corners(),
            [
                Coord::new(0, 0),
                Coord::new(4, 6),
                Coord::new(0, 6),
                Coord::new(4, 0),
            ]
        );
    }

    #[test]
    fn bounds_checks() {
        let board = Board::new(3, 2);
        assert!(board.in_bounds(Coord::new(0, 0)));
        assert!(board.in_bounds(Coord::new(1, 2)));
        assert!(!board.in_bounds(Coord::new(2, 0)));
        assert!(!board.in_bounds(Coord::new(0, 3)));
        assert!(!board.in_bounds(Coord::new(-1, 0)));
        assert!(!board.in_bounds(Coord::SENTINEL));
    }

    #[test]
    fn vacate_accumulates() {
        let mut board = Board::new(4, 4);
        let cell = Coord::new(2, 2);
        board.vacate(cell);
        board.vacate(cell);
        assert_eq!(board.durability_at(cell), -1);
    }

    #[test]
    fn coord_addition_and_display() {
        let c = Coord::new(3, 4) + Coord::new(-1, 0);
        assert_eq!(c, Coord::new(2, 4));
        assert_eq!(c.to_string(), "2 4");
        assert_eq!(Coord::SENTINEL.to_string(), "-1 -1");
    }
}
