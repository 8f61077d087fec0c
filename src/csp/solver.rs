#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver seam and the types shared by every solver: configuration and statistics.

use crate::csp::assignment::Solution;
use crate::csp::model::ConstraintModel;
use crate::csp::value_ordering::{LeastConstraining, ValueOrdering, ValueOrderingImpls};
use crate::csp::variable_selection::{MrvDegree, VariableSelection, VariableSelectionImpls};
use crate::csp::word::Word;
use std::fmt::Debug;

/// Picks the strategy types a solver is built from.
pub trait SolverConfig: Debug + Clone {
    /// Chooses the next variable.
    type VariableSelector: VariableSelection + Default;
    /// Orders the chosen variable's values.
    type ValueOrder: ValueOrdering + Default;
}

/// MRV/degree selection with least-constraining-value ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type VariableSelector = MrvDegree;
    type ValueOrder = LeastConstraining;
}

/// Strategies chosen at runtime, e.g. from command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DynamicConfig;

impl SolverConfig for DynamicConfig {
    type VariableSelector = VariableSelectionImpls;
    type ValueOrder = ValueOrderingImpls;
}

/// Counters describing one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Tentative assignments that passed the consistency check.
    pub assignments: usize,
    /// Assignments undone after their subtree failed.
    pub backtracks: usize,
    /// Candidates rejected by the consistency check.
    pub rejected: usize,
    /// Branches cut because inference emptied a domain.
    pub inference_wipeouts: usize,
    /// Words removed by node consistency.
    pub node_pruned: usize,
    /// Arcs popped from AC-3 work queues, initial pass and inference.
    pub arcs_processed: usize,
    /// Revisions that removed at least one value.
    pub revisions: usize,
    /// Words removed by revisions and inference.
    pub values_pruned: usize,
}

/// A constraint-satisfaction solver over a crossword model.
pub trait Solver<Config: SolverConfig = DefaultConfig> {
    /// Creates a solver whose every variable starts with the full word list.
    fn new<'a>(model: ConstraintModel, words: impl IntoIterator<Item = &'a Word>) -> Self;

    /// Runs to completion. `None` means the puzzle has no solution; it is not an error.
    fn solve(&mut self) -> Option<Solution>;

    /// Statistics of the last `solve`.
    fn stats(&self) -> SolutionStats;
}
