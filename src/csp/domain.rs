#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-variable candidate sets.
//!
//! Domains only shrink. Removals made at level 0 (before search starts) are
//! permanent; removals made after `push_level` are logged on a `Trail` and put
//! back by the matching `pop_level`.

use crate::csp::model::ConstraintModel;
use crate::csp::trail::Trail;
use crate::csp::variable::VarId;
use crate::csp::word::Word;
use std::collections::BTreeSet;
use std::ops::Index;

/// The candidate words of a single variable, kept sorted for deterministic iteration.
pub type Domain = BTreeSet<Word>;

/// Mapping from every variable of a model to its current domain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Domains {
    sets: Vec<Domain>,
    trail: Trail,
    level: usize,
}

impl Index<VarId> for Domains {
    type Output = Domain;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.sets[index]
    }
}

impl Domains {
    /// Gives every variable of `model` its own copy of `words`.
    #[must_use]
    pub fn new<'a>(model: &ConstraintModel, words: impl IntoIterator<Item = &'a Word>) -> Self {
        let universe: Domain = words.into_iter().cloned().collect();
        Self {
            sets: vec![universe; model.len()],
            trail: Trail::new(),
            level: 0,
        }
    }

    /// Number of variables covered.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.sets.len()
    }

    /// The domain of `x`.
    #[must_use]
    pub fn get(&self, x: VarId) -> &Domain {
        &self.sets[x]
    }

    /// Number of candidates left for `x`.
    #[must_use]
    pub fn len(&self, x: VarId) -> usize {
        self.sets[x].len()
    }

    /// Returns `true` if `x` has no candidates left.
    #[must_use]
    pub fn is_empty(&self, x: VarId) -> bool {
        self.sets[x].is_empty()
    }

    /// Returns `true` if `word` is still a candidate for `x`.
    #[must_use]
    pub fn contains(&self, x: VarId, word: &Word) -> bool {
        self.sets[x].contains(word)
    }

    /// Iterates over `(variable, domain)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Domain)> {
        self.sets.iter().enumerate()
    }

    /// Current search level; 0 before any `push_level`.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Removes `word` from the domain of `x`. Returns `true` if it was present.
    pub fn remove(&mut self, x: VarId, word: &Word) -> bool {
        if !self.sets[x].remove(word) {
            return false;
        }
        if self.level > 0 {
            self.trail.push(x, word.clone(), self.level);
        }
        true
    }

    /// Removes every candidate of `x` rejected by `keep`. Returns how many went.
    pub fn retain(&mut self, x: VarId, mut keep: impl FnMut(&Word) -> bool) -> usize {
        let doomed: Vec<Word> = self.sets[x].iter().filter(|w| !keep(w)).cloned().collect();
        for word in &doomed {
            self.remove(x, word);
        }
        doomed.len()
    }

    /// Opens a new search level; removals from now on are undoable.
    pub fn push_level(&mut self) {
        self.level += 1;
    }

    /// Restores every word removed since the matching `push_level`.
    pub fn pop_level(&mut self) {
        if self.level == 0 {
            return;
        }
        for step in self.trail.backstep_to(self.level) {
            self.sets[step.var].insert(step.word);
        }
        self.level -= 1;
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

    fn model() -> ConstraintModel {
        let a = Variable::across(0, 0, 3);
        let d = Variable::down(0, 0, 3);
        ConstraintModel::new(vec![a, d], [(a, d, Overlap(0, 0))]).unwrap()
    }

    #[test]
    fn test_each_variable_gets_its_own_copy() {
        let universe = words(&["ABC", "ABD"]);
        let mut domains = Domains::new(&model(), &universe);

        assert!(domains.remove(0, &Word::from("ABC")));
        assert_eq!(domains.len(0), 1);
        assert_eq!(domains.len(1), 2);
        assert!(domains.contains(1, &Word::from("ABC")));
        assert_eq!(universe.len(), 2);
    }

    #[test]
    fn test_remove_missing_word() {
        let mut domains = Domains::new(&model(), &words(&["ABC"]));
        assert!(!domains.remove(0, &Word::from("XYZ")));
        assert!(domains.remove(0, &Word::from("ABC")));
        assert!(domains.is_empty(0));
    }

    #[test]
    fn test_level_zero_removals_are_permanent() {
        let mut domains = Domains::new(&model(), &words(&["ABC", "ABD"]));
        domains.remove(0, &Word::from("ABC"));
        domains.pop_level();
        assert_eq!(domains.len(0), 1);
    }

    #[test]
    fn test_pop_level_restores_only_that_level() {
        let mut domains = Domains::new(&model(), &words(&["ABC", "ABD", "XYZ"]));

        domains.push_level();
        domains.remove(0, &Word::from("ABC"));
        domains.push_level();
        assert_eq!(domains.retain(1, |w| w.letter(0) == Some('X')), 2);
        domains.remove(0, &Word::from("ABD"));

        assert_eq!(domains.len(0), 1);
        assert_eq!(domains.len(1), 1);

        domains.pop_level();
        assert_eq!(domains.len(0), 2);
        assert_eq!(domains.len(1), 3);
        assert!(!domains.contains(0, &Word::from("ABC")));

        domains.pop_level();
        assert_eq!(domains.len(0), 3);
        assert_eq!(domains.level(), 0);
    }
}
