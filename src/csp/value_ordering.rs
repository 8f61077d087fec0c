#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategies for ordering the candidate words of the chosen slot.

use crate::csp::assignment::Assignment;
use crate::csp::domain::Domains;
use crate::csp::model::ConstraintModel;
use crate::csp::variable::VarId;
use crate::csp::word::Word;
use clap::ValueEnum;
use itertools::Itertools;
use std::fmt::{Debug, Display};

/// Orders the domain of a variable for the search to try.
pub trait ValueOrdering: Debug + Clone {
    /// Returns the current domain of `x`, best candidate first.
    ///
    /// Implementations only read the domains; they never prune.
    fn order(
        &self,
        x: VarId,
        model: &ConstraintModel,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<Word>;
}

/// Number of values `word` at `x` would rule out among the unassigned neighbours of `x`.
#[must_use]
pub fn eliminated_count(
    x: VarId,
    word: &Word,
    model: &ConstraintModel,
    domains: &Domains,
    assignment: &Assignment,
) -> usize {
    model
        .neighbors(x)
        .iter()
        .filter(|&&n| !assignment.is_assigned(n))
        .filter_map(|&n| model.overlap(x, n).map(|overlap| (n, overlap)))
        .map(|(n, overlap)| {
            let letter = word.letter(overlap.0);
            domains
                .get(n)
                .iter()
                .filter(|wn| wn.letter(overlap.1) != letter)
                .count()
        })
        .sum()
}

/// Least-constraining value first; ties keep the domain's sorted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeastConstraining;

impl ValueOrdering for LeastConstraining {
    fn order(
        &self,
        x: VarId,
        model: &ConstraintModel,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<Word> {
        domains
            .get(x)
            .iter()
            .map(|w| (eliminated_count(x, w, model, domains, assignment), w))
            .sorted_by_key(|&(count, _)| count)
            .map(|(_, w)| w.clone())
            .collect()
    }
}

/// The domain in sorted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lexical;

impl ValueOrdering for Lexical {
    fn order(&self, x: VarId, _: &ConstraintModel, domains: &Domains, _: &Assignment) -> Vec<Word> {
        domains.get(x).iter().cloned().collect()
    }
}

/// Runtime choice between the ordering strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrderingImpls {
    /// See `LeastConstraining`.
    LeastConstraining(LeastConstraining),
    /// See `Lexical`.
    Lexical(Lexical),
}

impl Default for ValueOrderingImpls {
    fn default() -> Self {
        Self::LeastConstraining(LeastConstraining)
    }
}

impl ValueOrdering for ValueOrderingImpls {
    fn order(
        &self,
        x: VarId,
        model: &ConstraintModel,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<Word> {
        match self {
            Self::LeastConstraining(o) => o.order(x, model, domains, assignment),
            Self::Lexical(o) => o.order(x, model, domains, assignment),
        }
    }
}

/// Value ordering strategy, as named on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum ValueOrderingType {
    /// Try the word that rules out the fewest neighbour values first.
    #[default]
    LeastConstraining,
    /// Try words in alphabetical order.
    Lexical,
}

impl Display for ValueOrderingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeastConstraining => write!(f, "least-constraining"),
            Self::Lexical => write!(f, "lexical"),
        }
    }
}

impl ValueOrderingType {
    /// Converts the `ValueOrderingType` to a concrete `ValueOrderingImpls`.
    #[must_use]
    pub const fn to_impl(self) -> ValueOrderingImpls {
        match self {
            Self::LeastConstraining => ValueOrderingImpls::LeastConstraining(LeastConstraining),
            Self::Lexical => ValueOrderingImpls::Lexical(Lexical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::model::Overlap;
    use crate::csp::variable::Variable;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|&w| Word::from(w)).collect()
    }

    fn corner_model() -> ConstraintModel {
        let v1 = Variable::across(0, 0, 3);
        let v2 = Variable::down(0, 0, 3);
        ConstraintModel::new(vec![v1, v2], [(v1, v2, Overlap(0, 0))]).unwrap()
    }

    #[test]
    fn test_least_constraining_first() {
        let model = corner_model();
        let domains = Domains::new(&model, &words(&["XAA", "ABC", "ABD", "AXE"]));
        let assignment = Assignment::new(model.len());

        // Words starting with 'A' leave three of the four neighbour values standing.
        assert_eq!(
            eliminated_count(0, &Word::from("ABC"), &model, &domains, &assignment),
            1
        );
        assert_eq!(
            eliminated_count(0, &Word::from("XAA"), &model, &domains, &assignment),
            3
        );

        let ordered = LeastConstraining.order(0, &model, &domains, &assignment);
        assert_eq!(ordered, words(&["ABC", "ABD", "AXE", "XAA"]));
    }

    #[test]
    fn test_assigned_neighbours_are_ignored() {
        let model = corner_model();
        let domains = Domains::new(&model, &words(&["XAA", "ABC"]));
        let mut assignment = Assignment::new(model.len());
        assignment.assign(1, Word::from("ABC"));

        assert_eq!(
            eliminated_count(0, &Word::from("XAA"), &model, &domains, &assignment),
            0
        );
        assert_eq!(
            LeastConstraining.order(0, &model, &domains, &assignment),
            words(&["ABC", "XAA"])
        );
    }

    #[test]
    fn test_lexical_is_domain_order() {
        let model = corner_model();
        let domains = Domains::new(&model, &words(&["XAA", "ABC"]));
        let assignment = Assignment::new(model.len());
        assert_eq!(
            ValueOrderingType::Lexical
                .to_impl()
                .order(0, &model, &domains, &assignment),
            words(&["ABC", "XAA"])
        );
    }
}
