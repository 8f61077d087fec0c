//! Partial and complete assignments of words to slots.

use crate::csp::model::ConstraintModel;
use crate::csp::variable::{VarId, Variable};
use crate::csp::word::Word;
use core::ops::Index;
use std::collections::BTreeMap;
use std::fmt::Display;

/// A partial assignment, one slot per variable of the model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    slots: Vec<Option<Word>>,
    assigned: usize,
}

impl Index<VarId> for Assignment {
    type Output = Option<Word>;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.slots[index]
    }
}

impl Assignment {
    /// An empty assignment over `n` variables.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            slots: vec![None; n],
            assigned: 0,
        }
    }

    /// Sets `x` to `word`, replacing any previous value.
    pub fn assign(&mut self, x: VarId, word: Word) {
        if self.slots[x].replace(word).is_none() {
            self.assigned += 1;
        }
    }

    /// Clears `x`, returning its previous value.
    pub fn unassign(&mut self, x: VarId) -> Option<Word> {
        let previous = self.slots[x].take();
        if previous.is_some() {
            self.assigned -= 1;
        }
        previous
    }

    /// The word assigned to `x`, if any.
    #[must_use]
    pub fn get(&self, x: VarId) -> Option<&Word> {
        self.slots[x].as_ref()
    }

    /// Returns `true` if `x` has a value.
    #[must_use]
    pub fn is_assigned(&self, x: VarId) -> bool {
        self.slots[x].is_some()
    }

    /// Number of assigned variables.
    #[must_use]
    pub const fn num_assigned(&self) -> usize {
        self.assigned
    }

    /// Returns `true` if every variable has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.slots.len()
    }

    /// Iterates over the assigned `(variable, word)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Word)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(x, w)| w.as_ref().map(|w| (x, w)))
    }

    /// Ids of the variables still without a value.
    pub fn unassigned(&self) -> impl Iterator<Item = VarId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(x, w)| w.is_none().then_some(x))
    }

    /// Re-keys a complete assignment by `Variable`.
    ///
    /// Returns `None` while any variable is still unassigned.
    #[must_use]
    pub fn to_solution(&self, model: &ConstraintModel) -> Option<Solution> {
        if !self.is_complete() {
            return None;
        }
        Some(Solution(
            self.iter()
                .map(|(x, w)| (model.variable(x), w.clone()))
                .collect(),
        ))
    }
}

/// A complete assignment, as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution(BTreeMap<Variable, Word>);

impl Solution {
    /// The word placed in `var`.
    #[must_use]
    pub fn get(&self, var: &Variable) -> Option<&Word> {
        self.0.get(var)
    }

    /// Number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no slot is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the slots in `Variable` order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Word)> {
        self.0.iter()
    }

    /// Maps the solution back onto the ids of `model`.
    ///
    /// Variables of the solution that `model` does not know are dropped.
    #[must_use]
    pub fn to_assignment(&self, model: &ConstraintModel) -> Assignment {
        let mut assignment = Assignment::new(model.len());
        for (var, word) in &self.0 {
            if let Some(x) = model.id_of(var) {
                assignment.assign(x, word.clone());
            }
        }
        assignment
    }

    /// Checks that the solution covers every variable of `model` and passes the
    /// full consistency check.
    #[must_use]
    pub fn verify(&self, model: &ConstraintModel) -> bool {
        let assignment = self.to_assignment(model);
        self.len() == model.len()
            && assignment.is_complete()
            && crate::csp::consistency::is_consistent(model, &assignment)
    }
}

impl FromIterator<(Variable, Word)> for Solution {
    fn from_iter<T: IntoIterator<Item = (Variable, Word)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (var, word) in &self.0 {
            writeln!(f, "{var}: {word}")?;
        }
        Ok(())
    }
}
