//! Command-line parsing and reporting for the `crossword` binary.

pub(crate) mod cli;
