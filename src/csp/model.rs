#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The static part of the problem: variables, the overlaps between them, and
//! the arcs derived from those overlaps.
//!
//! A `ConstraintModel` is validated once at construction and never mutated
//! afterwards. Everything the search needs repeatedly (neighbour lists, the arc
//! list, arc ids) is precomputed here so the hot loops only index into vectors.

use crate::csp::error::ModelError;
use crate::csp::variable::{VarId, Variable};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// The letter positions that must agree where two slots cross:
/// `(index in the first variable, index in the second variable)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Overlap(pub usize, pub usize);

impl Overlap {
    /// The same crossing seen from the other variable.
    #[must_use]
    pub const fn swap(self) -> Self {
        Self(self.1, self.0)
    }
}

/// A directed consistency requirement: `x` must stay consistent with `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Arc {
    /// The variable whose domain gets revised.
    pub x: VarId,
    /// The variable it is revised against.
    pub y: VarId,
}

impl Arc {
    /// Creates the arc `(x, y)`.
    #[must_use]
    pub const fn new(x: VarId, y: VarId) -> Self {
        Self { x, y }
    }
}

/// Neighbour lists are short in crosswords: one per crossing cell.
pub type Neighbors = SmallVec<[VarId; 8]>;

/// Variables plus pairwise overlap constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintModel {
    variables: Vec<Variable>,
    ids: FxHashMap<Variable, VarId>,
    overlaps: FxHashMap<(VarId, VarId), Overlap>,
    neighbors: Vec<Neighbors>,
    arcs: Vec<Arc>,
    arc_ids: FxHashMap<Arc, usize>,
}

impl ConstraintModel {
    /// Validates and builds a model.
    ///
    /// Each overlap may be given in either orientation; the reverse orientation
    /// is derived. Giving both orientations is accepted as long as they agree.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` for zero-length or duplicated variables, and for
    /// overlaps that reference unknown variables, relate a variable to itself,
    /// point outside a slot, or contradict an earlier overlap for the same pair.
    pub fn new(
        variables: Vec<Variable>,
        overlaps: impl IntoIterator<Item = (Variable, Variable, Overlap)>,
    ) -> Result<Self, ModelError> {
        let mut ids = FxHashMap::default();
        for (id, &var) in variables.iter().enumerate() {
            if var.length == 0 {
                return Err(ModelError::ZeroLength(var));
            }
            if ids.insert(var, id).is_some() {
                return Err(ModelError::DuplicateVariable(var));
            }
        }

        let mut pairwise: FxHashMap<(VarId, VarId), Overlap> = FxHashMap::default();
        for (a, b, overlap) in overlaps {
            let x = *ids.get(&a).ok_or(ModelError::UnknownVariable(a))?;
            let y = *ids.get(&b).ok_or(ModelError::UnknownVariable(b))?;
            if x == y {
                return Err(ModelError::SelfOverlap(a));
            }
            if overlap.0 >= a.length {
                return Err(ModelError::OverlapOutOfRange {
                    variable: a,
                    index: overlap.0,
                });
            }
            if overlap.1 >= b.length {
                return Err(ModelError::OverlapOutOfRange {
                    variable: b,
                    index: overlap.1,
                });
            }

            for (key, value) in [((x, y), overlap), ((y, x), overlap.swap())] {
                if let Some(existing) = pairwise.insert(key, value) {
                    if existing != value {
                        return Err(ModelError::ConflictingOverlap {
                            first: a,
                            second: b,
                        });
                    }
                }
            }
        }

        let mut neighbors = vec![Neighbors::new(); variables.len()];
        for &(x, y) in pairwise.keys().sorted() {
            neighbors[x].push(y);
        }

        let arcs = neighbors
            .iter()
            .enumerate()
            .flat_map(|(x, ns)| ns.iter().map(move |&y| Arc::new(x, y)))
            .collect_vec();
        let arc_ids = arcs.iter().enumerate().map(|(i, &arc)| (arc, i)).collect();

        Ok(Self {
            variables,
            ids,
            overlaps: pairwise,
            neighbors,
            arcs,
            arc_ids,
        })
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if the model has no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// All variables, indexed by `VarId`.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The variable with the given id.
    ///
    /// # Panics
    ///
    /// If `id` is not a variable of this model.
    #[must_use]
    pub fn variable(&self, id: VarId) -> Variable {
        self.variables[id]
    }

    /// Looks up the id of a variable.
    #[must_use]
    pub fn id_of(&self, var: &Variable) -> Option<VarId> {
        self.ids.get(var).copied()
    }

    /// The overlap between `x` and `y`, oriented `(index in x, index in y)`.
    #[must_use]
    pub fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Variables sharing a cell with `x`, in ascending id order.
    #[must_use]
    pub fn neighbors(&self, x: VarId) -> &[VarId] {
        &self.neighbors[x]
    }

    /// Number of neighbours of `x`.
    #[must_use]
    pub fn degree(&self, x: VarId) -> usize {
        self.neighbors[x].len()
    }

    /// Every arc of the problem: both directions of every overlapping pair.
    #[must_use]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Dense index of an arc, used for queue bookkeeping.
    #[must_use]
    pub fn arc_id(&self, arc: Arc) -> Option<usize> {
        self.arc_ids.get(&arc).copied()
    }

    /// The arcs `(z, x)` for every neighbour `z` of `x` except `except`.
    pub fn arcs_into(&self, x: VarId, except: Option<VarId>) -> impl Iterator<Item = Arc> + '_ {
        self.neighbors[x]
            .iter()
            .filter(move |&&z| Some(z) != except)
            .map(move |&z| Arc::new(z, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_pair() -> (Variable, Variable) {
        (Variable::across(0, 0, 3), Variable::down(0, 0, 3))
    }

    #[test]
    fn test_overlap_is_stored_both_ways() {
        let (a, d) = corner_pair();
        let model = ConstraintModel::new(vec![a, d], [(a, d, Overlap(0, 0))]).unwrap();

        assert_eq!(model.len(), 2);
        assert_eq!(model.overlap(0, 1), Some(Overlap(0, 0)));
        assert_eq!(model.overlap(1, 0), Some(Overlap(0, 0)));
        assert_eq!(model.neighbors(0), &[1]);
        assert_eq!(model.neighbors(1), &[0]);
        assert_eq!(model.arcs(), &[Arc::new(0, 1), Arc::new(1, 0)]);
    }

    #[test]
    fn test_asymmetric_overlap_is_swapped() {
        let a = Variable::across(2, 0, 4);
        let d = Variable::down(0, 3, 3);
        let model = ConstraintModel::new(vec![a, d], [(a, d, Overlap(3, 2))]).unwrap();

        assert_eq!(model.overlap(0, 1), Some(Overlap(3, 2)));
        assert_eq!(model.overlap(1, 0), Some(Overlap(2, 3)));
    }

    #[test]
    fn test_no_overlap_means_no_relation() {
        let a = Variable::across(0, 0, 3);
        let b = Variable::across(2, 0, 3);
        let model = ConstraintModel::new(vec![a, b], []).unwrap();

        assert_eq!(model.overlap(0, 1), None);
        assert!(model.neighbors(0).is_empty());
        assert!(model.arcs().is_empty());
        assert_eq!(model.degree(1), 0);
    }

    #[test]
    fn test_arcs_into_skips_source() {
        let a = Variable::across(1, 0, 3);
        let d1 = Variable::down(0, 0, 3);
        let d2 = Variable::down(0, 2, 3);
        let model = ConstraintModel::new(
            vec![a, d1, d2],
            [(a, d1, Overlap(0, 1)), (a, d2, Overlap(2, 1))],
        )
        .unwrap();

        let arcs = model.arcs_into(0, Some(1)).collect_vec();
        assert_eq!(arcs, vec![Arc::new(2, 0)]);
        assert_eq!(model.arcs_into(0, None).count(), 2);
        assert_eq!(model.arc_id(Arc::new(0, 1)), Some(0));
    }

    #[test]
    fn test_rejects_zero_length() {
        let bad = Variable::across(0, 0, 0);
        assert_eq!(
            ConstraintModel::new(vec![bad], []),
            Err(ModelError::ZeroLength(bad))
        );
    }

    #[test]
    fn test_rejects_duplicate_variable() {
        let (a, _) = corner_pair();
        assert_eq!(
            ConstraintModel::new(vec![a, a], []),
            Err(ModelError::DuplicateVariable(a))
        );
    }

    #[test]
    fn test_rejects_out_of_range_overlap() {
        let (a, d) = corner_pair();
        let result = ConstraintModel::new(vec![a, d], [(a, d, Overlap(0, 3))]);
        assert_eq!(
            result,
            Err(ModelError::OverlapOutOfRange {
                variable: d,
                index: 3
            })
        );
    }

    #[test]
    fn test_rejects_unknown_and_self_overlap() {
        let (a, d) = corner_pair();
        let stranger = Variable::down(5, 5, 2);

        assert_eq!(
            ConstraintModel::new(vec![a, d], [(a, stranger, Overlap(0, 0))]),
            Err(ModelError::UnknownVariable(stranger))
        );
        assert_eq!(
            ConstraintModel::new(vec![a, d], [(a, a, Overlap(0, 0))]),
            Err(ModelError::SelfOverlap(a))
        );
    }

    #[test]
    fn test_rejects_conflicting_overlap() {
        let (a, d) = corner_pair();
        let result = ConstraintModel::new(
            vec![a, d],
            [(a, d, Overlap(0, 0)), (d, a, Overlap(1, 0))],
        );
        assert!(matches!(result, Err(ModelError::ConflictingOverlap { .. })));

        let agreeing =
            ConstraintModel::new(vec![a, d], [(a, d, Overlap(0, 0)), (d, a, Overlap(0, 0))]);
        assert!(agreeing.is_ok());
    }
}
