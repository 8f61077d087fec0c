#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Generic constraint-satisfaction machinery for filling crossword slots.

pub mod assignment;
pub mod backtracking;
pub mod consistency;
pub mod domain;
pub mod error;
pub mod inference;
pub mod model;
pub mod solver;
pub mod trail;
pub mod value_ordering;
pub mod variable;
pub mod variable_selection;
pub mod word;
