//! A structure paired with a vocabulary, and the slots derived from it.

use crate::crossword::structure::{parse_structure, parse_structure_file, Structure};
use crate::crossword::words::{parse_words, parse_words_file};
use crate::crossword::ParseError;
use crate::csp::model::{ConstraintModel, Overlap};
use crate::csp::variable::{Direction, GridCoord, Variable};
use crate::csp::word::Word;
use rustc_hash::FxHashMap;
use std::fmt::Display;
use std::path::Path;

/// A puzzle to be filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossword {
    structure: Structure,
    words: Vec<Word>,
    variables: Vec<Variable>,
}

impl Crossword {
    /// Derives the slots of `structure`.
    #[must_use]
    pub fn new(structure: Structure, words: Vec<Word>) -> Self {
        let variables = find_variables(&structure);
        Self {
            structure,
            words,
            variables,
        }
    }

    /// Parses a structure and a word list given as text.
    ///
    /// # Errors
    ///
    /// If either input is empty.
    pub fn from_text(structure: &str, words: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse_structure(structure)?, parse_words(words)?))
    }

    /// Reads a structure file and a word file.
    ///
    /// # Errors
    ///
    /// If either file cannot be read or is empty.
    pub fn from_files(
        structure: impl AsRef<Path>,
        words: impl AsRef<Path>,
    ) -> Result<Self, ParseError> {
        Ok(Self::new(
            parse_structure_file(structure)?,
            parse_words_file(words)?,
        ))
    }

    /// The grid.
    #[must_use]
    pub const fn structure(&self) -> &Structure {
        &self.structure
    }

    /// The vocabulary, without duplicates.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Every slot: maximal runs of two or more open cells, across runs first,
    /// each group in row-major order of its start cell.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Where `v1` and `v2` share a cell, as letter indices into each.
    #[must_use]
    pub fn overlap(&self, v1: &Variable, v2: &Variable) -> Option<Overlap> {
        if v1 == v2 {
            return None;
        }
        let other = v2.cells();
        v1.cells().iter().enumerate().find_map(|(i, cell)| {
            other
                .iter()
                .position(|c| c == cell)
                .map(|j| Overlap(i, j))
        })
    }

    /// Every crossing as `(across, down, overlap)`, with the overlap indexing
    /// the across word first.
    #[must_use]
    pub fn overlaps(&self) -> Vec<(Variable, Variable, Overlap)> {
        let mut down_cells: FxHashMap<GridCoord, (Variable, usize)> = FxHashMap::default();
        for &var in self.variables.iter().filter(|v| v.direction == Direction::Down) {
            for (k, cell) in var.cells().into_iter().enumerate() {
                down_cells.insert(cell, (var, k));
            }
        }

        let mut overlaps = vec![];
        for &var in self.variables.iter().filter(|v| v.direction == Direction::Across) {
            for (k, cell) in var.cells().into_iter().enumerate() {
                if let Some(&(down, j)) = down_cells.get(&cell) {
                    overlaps.push((var, down, Overlap(k, j)));
                }
            }
        }
        overlaps
    }

    /// The slots crossing `var`.
    #[must_use]
    pub fn neighbors(&self, var: &Variable) -> Vec<Variable> {
        self.variables
            .iter()
            .filter(|v| self.overlap(var, v).is_some())
            .copied()
            .collect()
    }

    /// Builds the constraint model of this puzzle.
    ///
    /// # Errors
    ///
    /// Only if slot derivation produced an inconsistent model.
    pub fn to_model(&self) -> Result<ConstraintModel, ParseError> {
        Ok(ConstraintModel::new(
            self.variables.clone(),
            self.overlaps(),
        )?)
    }
}

impl Display for Crossword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.structure)
    }
}

fn find_variables(structure: &Structure) -> Vec<Variable> {
    let mut variables = vec![];

    for direction in [Direction::Across, Direction::Down] {
        for (row, col) in structure.open_cells() {
            let before = match direction {
                Direction::Across => col.checked_sub(1).map(|c| (row, c)),
                Direction::Down => row.checked_sub(1).map(|r| (r, col)),
            };
            if before.is_some_and(|cell| structure.is_open(cell)) {
                continue;
            }

            let length = (0..)
                .take_while(|&k| {
                    structure.is_open(match direction {
                        Direction::Across => (row, col + k),
                        Direction::Down => (row + k, col),
                    })
                })
                .count();
            if length > 1 {
                variables.push(Variable::new(row, col, direction, length));
            }
        }
    }

    variables
}
