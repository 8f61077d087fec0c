#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Undo log for domain pruning during search.
//!
//! Every removal made while a search level is open is pushed as a `Step`.
//! Backstepping to a level pops (and hands back) every removal made at that
//! level or deeper, so the caller can put the words back.

use crate::csp::variable::VarId;
use crate::csp::word::Word;

/// A single recorded removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Variable whose domain lost the word.
    pub var: VarId,
    /// The word removed.
    pub word: Word,
    /// Search level the removal was made at.
    pub level: usize,
}

/// Removals in the order they were made.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    t: Vec<Step>,
}

impl Trail {
    /// An empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded removals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Returns `true` if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Iterates over the recorded removals, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.t.iter()
    }

    /// Records a removal.
    pub fn push(&mut self, var: VarId, word: Word, level: usize) {
        self.t.push(Step { var, word, level });
    }

    /// Removes and returns every step made at `level` or deeper, newest first.
    pub fn backstep_to(&mut self, level: usize) -> Vec<Step> {
        let keep = self
            .t
            .iter()
            .rposition(|step| step.level < level)
            .map_or(0, |i| i + 1);
        let mut undone = self.t.split_off(keep);
        undone.reverse();
        undone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backstep_returns_newest_first() {
        let mut trail = Trail::new();
        trail.push(0, Word::from("ONE"), 1);
        trail.push(1, Word::from("TWO"), 2);
        trail.push(2, Word::from("SIX"), 2);

        let undone = trail.backstep_to(2);
        assert_eq!(undone.len(), 2);
        assert_eq!(undone[0].word, Word::from("SIX"));
        assert_eq!(undone[1].word, Word::from("TWO"));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_backstep_past_everything() {
        let mut trail = Trail::new();
        trail.push(0, Word::from("ONE"), 1);
        trail.push(0, Word::from("TEN"), 3);

        assert_eq!(trail.backstep_to(1).len(), 2);
        assert!(trail.is_empty());
        assert!(trail.backstep_to(1).is_empty());
    }
}
