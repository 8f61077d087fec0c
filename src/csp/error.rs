//! Errors raised while building a constraint model.
//!
//! These are the only hard errors in the engine; an unsatisfiable puzzle is
//! reported by the solver as `None`, not through this type.

use crate::csp::variable::Variable;
use thiserror::Error;

/// A constraint model that the solver must not be asked to run on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A slot with no cells.
    #[error("variable {0} has zero length")]
    ZeroLength(Variable),

    /// The same slot was listed more than once.
    #[error("variable {0} is declared more than once")]
    DuplicateVariable(Variable),

    /// An overlap mentions a slot the model does not contain.
    #[error("overlap references unknown variable {0}")]
    UnknownVariable(Variable),

    /// An overlap relates a slot to itself.
    #[error("variable {0} cannot overlap itself")]
    SelfOverlap(Variable),

    /// An overlap offset does not fall inside its slot.
    #[error("overlap index {index} is out of range for variable {variable}")]
    OverlapOutOfRange {
        /// The slot the index refers to.
        variable: Variable,
        /// The offending offset.
        index: usize,
    },

    /// The same pair was given two different overlaps.
    #[error("conflicting overlaps given for {first} and {second}")]
    ConflictingOverlap {
        /// First slot of the pair.
        first: Variable,
        /// Second slot of the pair.
        second: Variable,
    },
}
