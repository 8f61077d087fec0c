#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategies for choosing which unassigned slot to fill next.

use crate::csp::assignment::Assignment;
use crate::csp::domain::Domains;
use crate::csp::model::ConstraintModel;
use crate::csp::variable::VarId;
use clap::ValueEnum;
use std::cmp::Reverse;
use std::fmt::{Debug, Display};

/// Picks the next variable to branch on.
pub trait VariableSelection: Debug + Clone {
    /// Returns an unassigned variable, or `None` when every variable is assigned.
    fn pick(
        &self,
        model: &ConstraintModel,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId>;
}

/// Minimum remaining values, ties broken by highest degree, then by lowest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MrvDegree;

impl VariableSelection for MrvDegree {
    fn pick(
        &self,
        model: &ConstraintModel,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId> {
        assignment
            .unassigned()
            .min_by_key(|&x| (domains.len(x), Reverse(model.degree(x)), x))
    }
}

/// The first unassigned variable by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn pick(&self, _: &ConstraintModel, _: &Domains, assignment: &Assignment) -> Option<VarId> {
        assignment.unassigned().next()
    }
}

/// A uniformly random unassigned variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomOrder;

impl VariableSelection for RandomOrder {
    fn pick(&self, _: &ConstraintModel, _: &Domains, assignment: &Assignment) -> Option<VarId> {
        let unassigned: Vec<VarId> = assignment.unassigned().collect();
        if unassigned.is_empty() {
            return None;
        }
        Some(unassigned[fastrand::usize(..unassigned.len())])
    }
}

/// Runtime choice between the selection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableSelectionImpls {
    /// See `MrvDegree`.
    MrvDegree(MrvDegree),
    /// See `FixedOrder`.
    FixedOrder(FixedOrder),
    /// See `RandomOrder`.
    RandomOrder(RandomOrder),
}

impl Default for VariableSelectionImpls {
    fn default() -> Self {
        Self::MrvDegree(MrvDegree)
    }
}

impl VariableSelection for VariableSelectionImpls {
    fn pick(
        &self,
        model: &ConstraintModel,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId> {
        match self {
            Self::MrvDegree(s) => s.pick(model, domains, assignment),
            Self::FixedOrder(s) => s.pick(model, domains, assignment),
            Self::RandomOrder(s) => s.pick(model, domains, assignment),
        }
    }
}

/// Variable selection strategy, as named on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum VariableSelectionType {
    /// Fewest remaining values, then most neighbours.
    #[default]
    MrvDegree,
    /// Slots in the order they were derived from the grid.
    FixedOrder,
    /// A random unassigned slot.
    Random,
}

impl Display for VariableSelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MrvDegree => write!(f, "mrv-degree"),
            Self::FixedOrder => write!(f, "fixed-order"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl VariableSelectionType {
    /// Converts the `VariableSelectionType` to a concrete `VariableSelectionImpls`.
    #[must_use]
    pub const fn to_impl(self) -> VariableSelectionImpls {
        match self {
            Self::MrvDegree => VariableSelectionImpls::MrvDegree(MrvDegree),
            Self::FixedOrder => VariableSelectionImpls::FixedOrder(FixedOrder),
            Self::Random => VariableSelectionImpls::RandomOrder(RandomOrder),
        }
    }
}
