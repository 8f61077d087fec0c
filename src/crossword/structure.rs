//! The shape of a puzzle.
//!
//! A structure file has one row per line. `_` marks a cell to be filled;
//! every other character is a blocked cell. Rows shorter than the longest
//! one are padded with blocked cells.

use crate::crossword::ParseError;
use crate::csp::variable::GridCoord;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Marks a fillable cell in structure text.
pub const OPEN_CELL: char = '_';

/// A `height x width` grid of open and blocked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    cells: Vec<Vec<bool>>,
    width: usize,
}

impl Structure {
    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether `(row, col)` is a cell to be filled. Cells outside the grid are blocked.
    #[must_use]
    pub fn is_open(&self, (row, col): GridCoord) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Iterates over every open cell, row by row.
    pub fn open_cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &open)| open)
                .map(move |(col, _)| (row, col))
        })
    }
}

impl FromStr for Structure {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<&str> = s.lines().collect();
        while rows.last().is_some_and(|row| row.trim().is_empty()) {
            rows.pop();
        }

        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(ParseError::EmptyStructure);
        }

        let cells = rows
            .iter()
            .map(|row| {
                let mut cells: Vec<bool> = row.chars().map(|c| c == OPEN_CELL).collect();
                cells.resize(width, false);
                cells
            })
            .collect();

        Ok(Self { cells, width })
    }
}

impl Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for &open in row {
                write!(f, "{}", if open { OPEN_CELL } else { '#' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses structure text.
///
/// # Errors
///
/// `ParseError::EmptyStructure` if there are no cells at all.
pub fn parse_structure(text: &str) -> Result<Structure, ParseError> {
    text.parse()
}

/// Reads and parses a structure file.
///
/// # Errors
///
/// If the file cannot be read or holds an empty structure.
pub fn parse_structure_file(path: impl AsRef<Path>) -> Result<Structure, ParseError> {
    parse_structure(&std::fs::read_to_string(path)?)
}
