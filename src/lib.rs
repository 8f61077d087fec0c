#![warn(missing_docs)]
//! This crate fills crossword grids from a word list by treating each slot as
//! a variable of a constraint-satisfaction problem, solved with node and arc
//! consistency followed by heuristic backtracking search.

/// The `crossword` module parses puzzles and renders filled grids.
pub mod crossword;

/// The `csp` module implements the constraint model, consistency algorithms
/// and backtracking search.
pub mod csp;
