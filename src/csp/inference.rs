#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Optional pruning after each tentative assignment.
//!
//! All removals made here go through `Domains::remove` while a search level is
//! open, so they are undone when the search backtracks out of the branch.

use crate::csp::assignment::Assignment;
use crate::csp::consistency::{ac3, ArcStats};
use crate::csp::domain::Domains;
use crate::csp::model::{Arc, ConstraintModel};
use crate::csp::variable::VarId;
use crate::csp::word::Word;
use clap::ValueEnum;
use log::trace;
use std::fmt::Display;

/// What to do after assigning `word` to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum InferenceType {
    /// Nothing beyond the initial AC-3 pass.
    #[default]
    None,
    /// Prune the unassigned neighbours against the new word.
    ForwardChecking,
    /// Maintain arc consistency: fix the variable to the word and rerun AC-3
    /// from its unassigned neighbours.
    Mac,
}

impl Display for InferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::ForwardChecking => write!(f, "forward-checking"),
            Self::Mac => write!(f, "mac"),
        }
    }
}

impl InferenceType {
    /// Prunes domains after `x = word`. Returns `false` if some domain emptied,
    /// in which case the branch cannot succeed.
    pub fn apply(
        self,
        model: &ConstraintModel,
        domains: &mut Domains,
        assignment: &Assignment,
        x: VarId,
        word: &Word,
        stats: &mut ArcStats,
    ) -> bool {
        match self {
            Self::None => true,
            Self::ForwardChecking => forward_check(model, domains, assignment, x, word, stats),
            Self::Mac => maintain_arc_consistency(model, domains, assignment, x, word, stats),
        }
    }
}

fn forward_check(
    model: &ConstraintModel,
    domains: &mut Domains,
    assignment: &Assignment,
    x: VarId,
    word: &Word,
    stats: &mut ArcStats,
) -> bool {
    for &n in model.neighbors(x) {
        if assignment.is_assigned(n) {
            continue;
        }
        let Some(overlap) = model.overlap(x, n) else {
            continue;
        };
        let letter = word.letter(overlap.0);
        let removed = domains.retain(n, |wn| wn != word && wn.letter(overlap.1) == letter);
        stats.values_pruned += removed;

        if domains.is_empty(n) {
            trace!("forward checking {x} = {word} wiped out {n}");
            return false;
        }
    }
    true
}

fn maintain_arc_consistency(
    model: &ConstraintModel,
    domains: &mut Domains,
    assignment: &Assignment,
    x: VarId,
    word: &Word,
    stats: &mut ArcStats,
) -> bool {
    stats.values_pruned += domains.retain(x, |w| w == word);

    let arcs: Vec<Arc> = model
        .arcs_into(x, None)
        .filter(|arc| !assignment.is_assigned(arc.x))
        .collect();

    ac3(model, domains, Some(arcs), stats).is_consistent()
}
