#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Grid slots: the variables of the crossword CSP.

use smallvec::SmallVec;
use std::fmt::Display;

/// Zero-indexed `(row, col)` coordinates of a grid cell, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// Dense identifier for a variable, based on its index in the `ConstraintModel`.
pub type VarId = usize;

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right; the column advances along the slot.
    Across,
    /// Top to bottom; the row advances along the slot.
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Across => write!(f, "across"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// A contiguous run of cells in one direction.
///
/// Two variables are the same variable iff all four fields match, so the
/// derived `Eq`/`Hash`/`Ord` are exactly the identity the solver relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub col: usize,
    /// Direction the slot runs in.
    pub direction: Direction,
    /// Number of cells in the slot.
    pub length: usize,
}

impl Variable {
    /// Creates a variable starting at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    /// Shorthand for an across slot.
    #[must_use]
    pub const fn across(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Direction::Across, length)
    }

    /// Shorthand for a down slot.
    #[must_use]
    pub const fn down(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Direction::Down, length)
    }

    /// Coordinates of the `k`-th cell of the slot.
    #[must_use]
    pub const fn cell(&self, k: usize) -> GridCoord {
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }

    /// All cells covered by the slot, in order.
    #[must_use]
    pub fn cells(&self) -> SmallVec<[GridCoord; 16]> {
        (0..self.length).map(|k| self.cell(k)).collect()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.col, self.direction, self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cells_across_and_down() {
        let across = Variable::across(2, 1, 3);
        assert_eq!(across.cells().as_slice(), &[(2, 1), (2, 2), (2, 3)]);

        let down = Variable::down(0, 4, 2);
        assert_eq!(down.cells().as_slice(), &[(0, 4), (1, 4)]);
    }

    #[test]
    fn test_structural_identity() {
        let a = Variable::across(0, 0, 3);
        let b = Variable::new(0, 0, Direction::Across, 3);
        let c = Variable::down(0, 0, 3);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Variable> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Variable::down(1, 2, 5).to_string(), "(1, 2) down : 5");
    }
}
