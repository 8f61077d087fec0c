#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Backtracking search over partial assignments.
//!
//! `solve` first makes every domain node consistent and then arc consistent;
//! a wipeout at this stage means there is no solution and the search is never
//! started. The search itself:
//!
//! 1.  **Selection:** pick an unassigned variable (MRV, then degree, by default).
//! 2.  **Ordering:** try its remaining words, least constraining first by default.
//! 3.  **Check:** skip a word unless the extended assignment stays consistent
//!     (lengths, shared letters, no repeated word).
//! 4.  **Inference:** optionally prune the domains of unassigned neighbours. Every
//!     removal is logged under the current level and undone on backtrack, so
//!     sibling branches always see the same domains.
//! 5.  **Recursion:** a complete assignment is returned upward; a dead end is
//!     reported as `false` and the next word is tried.

use crate::csp::assignment::{Assignment, Solution};
use crate::csp::consistency::{
    ac3, enforce_node_consistency, is_consistent_extension, ArcConsistency, ArcStats,
};
use crate::csp::domain::Domains;
use crate::csp::inference::InferenceType;
use crate::csp::model::ConstraintModel;
use crate::csp::solver::{DefaultConfig, SolutionStats, Solver, SolverConfig};
use crate::csp::value_ordering::ValueOrdering;
use crate::csp::variable_selection::VariableSelection;
use crate::csp::word::Word;
use log::{debug, trace};

/// Backtracking solver, generic over its strategy `Config`.
#[derive(Debug, Clone)]
pub struct Backtracking<Config: SolverConfig = DefaultConfig> {
    /// The problem being solved.
    pub model: ConstraintModel,
    /// Current domains; pruned in place.
    pub domains: Domains,
    /// Variable selection heuristic.
    pub selector: Config::VariableSelector,
    /// Value ordering heuristic.
    pub ordering: Config::ValueOrder,
    /// Pruning performed after each assignment.
    pub inference: InferenceType,
    stats: SolutionStats,
    arc_stats: ArcStats,
}

impl<Config: SolverConfig> Solver<Config> for Backtracking<Config> {
    fn new<'a>(model: ConstraintModel, words: impl IntoIterator<Item = &'a Word>) -> Self {
        Self::from_parts(
            model,
            words,
            Config::VariableSelector::default(),
            Config::ValueOrder::default(),
            InferenceType::default(),
        )
    }

    fn solve(&mut self) -> Option<Solution> {
        self.stats = SolutionStats::default();
        self.arc_stats = ArcStats::default();

        self.stats.node_pruned = enforce_node_consistency(&self.model, &mut self.domains);
        debug!(
            "node consistency removed {} word(s) across {} variable(s)",
            self.stats.node_pruned,
            self.model.len()
        );

        if let Some((x, _)) = self.domains.iter().find(|(_, d)| d.is_empty()) {
            debug!("no word fits {}", self.model.variable(x));
            return None;
        }

        let consistency = ac3(&self.model, &mut self.domains, None, &mut self.arc_stats);
        self.sync_arc_stats();
        if let ArcConsistency::Wipeout(x) = consistency {
            debug!("arc consistency emptied the domain of {}", self.model.variable(x));
            return None;
        }
        debug!(
            "arc consistency: {} arc(s) processed, {} value(s) pruned",
            self.arc_stats.arcs_processed, self.arc_stats.values_pruned
        );

        let mut assignment = Assignment::new(self.model.len());
        let found = self.backtrack(&mut assignment);
        self.sync_arc_stats();
        debug!(
            "search finished: {} assignment(s), {} backtrack(s)",
            self.stats.assignments, self.stats.backtracks
        );

        if found {
            assignment.to_solution(&self.model)
        } else {
            None
        }
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl<Config: SolverConfig> Backtracking<Config> {
    /// Builds a solver from explicitly chosen strategies.
    pub fn from_parts<'a>(
        model: ConstraintModel,
        words: impl IntoIterator<Item = &'a Word>,
        selector: Config::VariableSelector,
        ordering: Config::ValueOrder,
        inference: InferenceType,
    ) -> Self {
        let domains = Domains::new(&model, words);
        Self {
            model,
            domains,
            selector,
            ordering,
            inference,
            stats: SolutionStats::default(),
            arc_stats: ArcStats::default(),
        }
    }

    /// Sets the inference used after each assignment.
    #[must_use]
    pub const fn with_inference(mut self, inference: InferenceType) -> Self {
        self.inference = inference;
        self
    }

    fn sync_arc_stats(&mut self) {
        self.stats.arcs_processed = self.arc_stats.arcs_processed;
        self.stats.revisions = self.arc_stats.revisions;
        self.stats.values_pruned = self.arc_stats.values_pruned;
    }

    /// Extends `assignment` to a complete one. On `false` the assignment and the
    /// domains are exactly as they were on entry.
    fn backtrack(&mut self, assignment: &mut Assignment) -> bool {
        if assignment.is_complete() {
            return true;
        }

        let Some(x) = self.selector.pick(&self.model, &self.domains, assignment) else {
            return false;
        };
        let values = self
            .ordering
            .order(x, &self.model, &self.domains, assignment);

        for word in values {
            if !is_consistent_extension(&self.model, assignment, x, &word) {
                self.stats.rejected += 1;
                continue;
            }

            trace!("level {}: {} = {word}", assignment.num_assigned(), self.model.variable(x));
            assignment.assign(x, word.clone());
            self.stats.assignments += 1;
            self.domains.push_level();

            let pruned_ok = self.inference.apply(
                &self.model,
                &mut self.domains,
                assignment,
                x,
                &word,
                &mut self.arc_stats,
            );
            if !pruned_ok {
                self.stats.inference_wipeouts += 1;
            }

            if pruned_ok && self.backtrack(assignment) {
                return true;
            }

            self.domains.pop_level();
            assignment.unassign(x);
            self.stats.backtracks += 1;
        }

        false
    }
}
