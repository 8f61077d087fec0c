#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Crossword puzzles: structure and word list parsing, slot derivation, and
//! rendering of a filled grid.

use crate::csp::error::ModelError;
use thiserror::Error;

/// The `puzzle` module turns a structure into variables and overlaps.
pub mod puzzle;
/// The `render` module draws a solution onto the grid.
pub mod render;
/// The `structure` module parses the grid of open and blocked cells.
pub mod structure;
/// The `words` module parses the vocabulary.
pub mod words;

pub use puzzle::Crossword;
pub use structure::Structure;

/// Errors from reading a puzzle or writing its solution.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The structure has no rows or no columns.
    #[error("structure is empty")]
    EmptyStructure,

    /// The word list has no words.
    #[error("word list is empty")]
    EmptyWordList,

    /// The slots derived from the structure do not form a valid model.
    #[error("invalid crossword: {0}")]
    Model(#[from] ModelError),
}
