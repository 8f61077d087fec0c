//! Drawing a solution onto its grid.

use crate::crossword::puzzle::Crossword;
use crate::crossword::ParseError;
use crate::csp::assignment::Solution;
use std::path::Path;

/// Drawn in place of a blocked cell.
pub const BLOCKED_CELL: char = '█';

impl Crossword {
    /// The letter in every cell, `None` for blocked cells and open cells no
    /// placed word covers. Letters falling outside the grid are ignored.
    #[must_use]
    pub fn letter_grid(&self, solution: &Solution) -> Vec<Vec<Option<char>>> {
        let structure = self.structure();
        let mut grid = vec![vec![None; structure.width()]; structure.height()];

        for (var, word) in solution.iter() {
            for (cell, letter) in var.cells().into_iter().zip(word.letters()) {
                if structure.is_open(cell) {
                    grid[cell.0][cell.1] = Some(letter);
                }
            }
        }
        grid
    }

    /// The grid as text, one line per row: letters in open cells, a space in
    /// an open cell with no letter, `BLOCKED_CELL` elsewhere.
    #[must_use]
    pub fn render(&self, solution: &Solution) -> String {
        let structure = self.structure();
        let grid = self.letter_grid(solution);
        let mut out = String::with_capacity(structure.height() * (structure.width() + 1) * 3);

        for (row, letters) in grid.iter().enumerate() {
            for (col, letter) in letters.iter().enumerate() {
                out.push(if structure.is_open((row, col)) {
                    letter.unwrap_or(' ')
                } else {
                    BLOCKED_CELL
                });
            }
            out.push('\n');
        }
        out
    }

    /// Writes `render(solution)` to `path`.
    ///
    /// # Errors
    ///
    /// If the file cannot be written.
    pub fn save(&self, solution: &Solution, path: impl AsRef<Path>) -> Result<(), ParseError> {
        std::fs::write(path, self.render(solution))?;
        Ok(())
    }
}
