//! Candidate fillers for a slot.

use smallvec::SmallVec;
use std::fmt::Display;

/// The expected maximum length of a single word; longer words spill to the heap.
pub const MAX_WORD_LENGTH: usize = 16;

/// A candidate word, stored as chars so that `len` and `letter` agree with
/// the cell count of a slot regardless of encoding width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Word(SmallVec<[char; MAX_WORD_LENGTH]>);

impl Word {
    /// Creates a word from its text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(text.chars().collect())
    }

    /// Number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty word.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The letter at position `i`, if any.
    #[must_use]
    pub fn letter(&self, i: usize) -> Option<char> {
        self.0.get(i).copied()
    }

    /// Iterates over the letters.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Word {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
