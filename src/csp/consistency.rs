#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Node consistency, arc consistency (AC-3) and the assignment consistency check.
//!
//! Node consistency enforces the unary constraint (a word must be as long as
//! its slot). Arc consistency enforces the binary overlap constraints: after
//! `ac3` returns `Consistent`, every word left in `domain(x)` has at least one
//! different partner in `domain(y)` with the same letter at the shared cell,
//! for every arc `(x, y)`.
//!
//! Neither pass treats an empty domain as an error: `ac3` reports it as
//! `ArcConsistency::Wipeout` and the caller turns that into "no solution".

use crate::csp::assignment::Assignment;
use crate::csp::domain::Domains;
use crate::csp::model::{Arc, ConstraintModel};
use crate::csp::variable::VarId;
use crate::csp::word::Word;
use bit_vec::BitVec;
use log::trace;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Outcome of an AC-3 run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum ArcConsistency {
    /// The queue drained; all domains are non-empty and arc consistent.
    Consistent,
    /// Revising this variable emptied its domain.
    Wipeout(VarId),
}

impl ArcConsistency {
    /// Returns `true` for `Consistent`.
    #[must_use]
    pub const fn is_consistent(self) -> bool {
        matches!(self, Self::Consistent)
    }
}

/// Counters collected by `revise` and `ac3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArcStats {
    /// Arcs popped from the work queue.
    pub arcs_processed: usize,
    /// Revisions that removed at least one value.
    pub revisions: usize,
    /// Values removed by revisions.
    pub values_pruned: usize,
}

/// Removes from every domain the words whose length differs from the slot's.
///
/// Returns the number of words removed. Running it twice removes nothing the
/// second time.
pub fn enforce_node_consistency(model: &ConstraintModel, domains: &mut Domains) -> usize {
    (0..model.len())
        .map(|x| {
            let length = model.variable(x).length;
            domains.retain(x, |w| w.len() == length)
        })
        .sum()
}

/// Makes `x` arc consistent with `y`.
///
/// A word in `domain(x)` survives only if some *other* word in `domain(y)`
/// carries the same letter at the shared cell; a word cannot support itself
/// because two slots may never hold the same word. If the two variables do not
/// overlap nothing is removed. Returns `true` if `domain(x)` changed.
pub fn revise(
    model: &ConstraintModel,
    domains: &mut Domains,
    x: VarId,
    y: VarId,
    stats: &mut ArcStats,
) -> bool {
    let Some(overlap) = model.overlap(x, y) else {
        return false;
    };

    let mut support: FxHashMap<char, usize> = FxHashMap::default();
    for c in domains.get(y).iter().filter_map(|wy| wy.letter(overlap.1)) {
        *support.entry(c).or_default() += 1;
    }

    let ys = domains.get(y);
    let doomed: Vec<Word> = domains
        .get(x)
        .iter()
        .filter(|wx| {
            let Some(c) = wx.letter(overlap.0) else {
                return true;
            };
            let own = usize::from(wx.letter(overlap.1) == Some(c) && ys.contains(*wx));
            support.get(&c).copied().unwrap_or(0) <= own
        })
        .cloned()
        .collect();

    for word in &doomed {
        domains.remove(x, word);
    }
    let removed = doomed.len();

    if removed > 0 {
        stats.revisions += 1;
        stats.values_pruned += removed;
        trace!("revise({x}, {y}) removed {removed} value(s)");
    }

    removed > 0
}

/// AC-3.
///
/// The queue starts with `arcs`, or with every arc of the model when `arcs` is
/// `None`. Arcs are processed first in, first out, and an arc already waiting
/// in the queue is not added again. Whenever `revise(x, y)` shrinks `domain(x)`
/// the arcs `(z, x)` for every other neighbour `z` of `x` are queued.
pub fn ac3(
    model: &ConstraintModel,
    domains: &mut Domains,
    arcs: Option<Vec<Arc>>,
    stats: &mut ArcStats,
) -> ArcConsistency {
    let initial = arcs.unwrap_or_else(|| model.arcs().to_vec());

    let mut queued = BitVec::from_elem(model.arcs().len(), false);
    let mut queue = VecDeque::with_capacity(initial.len());
    for arc in initial {
        enqueue(model, &mut queue, &mut queued, arc);
    }

    while let Some(arc) = queue.pop_front() {
        if let Some(id) = model.arc_id(arc) {
            queued.set(id, false);
        }
        stats.arcs_processed += 1;

        if !revise(model, domains, arc.x, arc.y, stats) {
            continue;
        }

        if domains.is_empty(arc.x) {
            trace!("ac3: domain of {} wiped out", arc.x);
            return ArcConsistency::Wipeout(arc.x);
        }

        for next in model.arcs_into(arc.x, Some(arc.y)) {
            enqueue(model, &mut queue, &mut queued, next);
        }
    }

    ArcConsistency::Consistent
}

fn enqueue(model: &ConstraintModel, queue: &mut VecDeque<Arc>, queued: &mut BitVec, arc: Arc) {
    match model.arc_id(arc) {
        Some(id) if queued[id] => {}
        Some(id) => {
            queued.set(id, true);
            queue.push_back(arc);
        }
        // Not an arc of the model; revise will treat it as a no-op.
        None => queue.push_back(arc),
    }
}

/// The full consistency check of a (possibly partial) assignment.
///
/// Holds iff every assigned word fits its slot's length, every pair of
/// overlapping assigned slots agrees on the shared letter, and no word is used
/// by two different slots.
#[must_use]
pub fn is_consistent(model: &ConstraintModel, assignment: &Assignment) -> bool {
    let assigned: Vec<(VarId, &Word)> = assignment.iter().collect();

    for (i, &(x, wx)) in assigned.iter().enumerate() {
        if wx.len() != model.variable(x).length {
            return false;
        }
        for &(y, wy) in &assigned[i + 1..] {
            if wx == wy {
                return false;
            }
            if let Some(overlap) = model.overlap(x, y) {
                if wx.letter(overlap.0) != wy.letter(overlap.1) {
                    return false;
                }
            }
        }
    }

    true
}

/// Checks whether assigning `word` to `x` keeps a consistent assignment consistent.
///
/// Only the constraints involving `x` are examined, so for an assignment that
/// already passes `is_consistent` this is equivalent to running the full check
/// on the extended assignment. Any current value of `x` is ignored.
#[must_use]
pub fn is_consistent_extension(
    model: &ConstraintModel,
    assignment: &Assignment,
    x: VarId,
    word: &Word,
) -> bool {
    if word.len() != model.variable(x).length {
        return false;
    }

    assignment.iter().filter(|&(y, _)| y != x).all(|(y, wy)| {
        wy != word
            && model
                .overlap(x, y)
                .is_none_or(|overlap| word.letter(overlap.0) == wy.letter(overlap.1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::model::Overlap;
    use crate::csp::variable::Variable;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|&w| Word::from(w)).collect()
    }

    /// V1 across and V2 down, both length 3, sharing the top-left cell.
    fn corner_model() -> ConstraintModel {
        let v1 = Variable::across(0, 0, 3);
        let v2 = Variable::down(0, 0, 3);
        ConstraintModel::new(vec![v1, v2], [(v1, v2, Overlap(0, 0))]).unwrap()
    }

    fn names(domains: &Domains, x: VarId) -> Vec<String> {
        domains.get(x).iter().map(ToString::to_string).collect()
    }

    fn assert_arc_consistent(model: &ConstraintModel, domains: &Domains) {
        for arc in model.arcs() {
            let overlap = model.overlap(arc.x, arc.y).unwrap();
            for wx in domains.get(arc.x) {
                assert!(
                    domains
                        .get(arc.y)
                        .iter()
                        .any(|wy| wy != wx && wx.letter(overlap.0) == wy.letter(overlap.1)),
                    "{wx} has no support in {}",
                    arc.y
                );
            }
        }
    }

    #[test]
    fn test_node_consistency_filters_by_length() {
        let model = corner_model();
        let mut domains = Domains::new(&model, &words(&["ABC", "ABD", "XYZ", "AB", "ABCD"]));

        assert_eq!(enforce_node_consistency(&model, &mut domains), 4);
        for (x, domain) in domains.iter() {
            assert!(domain.iter().all(|w| w.len() == model.variable(x).length));
        }
        assert_eq!(enforce_node_consistency(&model, &mut domains), 0);
    }

    #[test]
    fn test_revise_without_overlap_is_noop() {
        let a = Variable::across(0, 0, 3);
        let b = Variable::across(2, 0, 3);
        let model = ConstraintModel::new(vec![a, b], []).unwrap();
        let mut domains = Domains::new(&model, &words(&["ABC", "XYZ"]));
        let mut stats = ArcStats::default();

        assert!(!revise(&model, &mut domains, 0, 1, &mut stats));
        assert_eq!(domains.len(0), 2);
        assert_eq!(stats, ArcStats::default());
    }

    #[test]
    fn test_revise_removes_unsupported_values() {
        let model = corner_model();
        let mut domains = Domains::new(&model, &words(&["ABC", "ABD", "XYZ"]));
        domains.remove(1, &Word::from("XYZ"));
        let mut stats = ArcStats::default();

        assert!(revise(&model, &mut domains, 0, 1, &mut stats));
        assert_eq!(names(&domains, 0), vec!["ABC", "ABD"]);
        assert_eq!(stats.revisions, 1);
        assert_eq!(stats.values_pruned, 1);

        assert!(!revise(&model, &mut domains, 0, 1, &mut stats));
    }

    #[test]
    fn test_ac3_keeps_mutually_supported_words() {
        let model = corner_model();
        let mut domains = Domains::new(&model, &words(&["ABC", "ABD", "XYZ"]));
        enforce_node_consistency(&model, &mut domains);
        let mut stats = ArcStats::default();

        assert_eq!(
            ac3(&model, &mut domains, None, &mut stats),
            ArcConsistency::Consistent
        );
        assert_eq!(names(&domains, 0), vec!["ABC", "ABD"]);
        assert_eq!(names(&domains, 1), vec!["ABC", "ABD"]);
        assert_eq!(stats.arcs_processed, 2);
        assert_arc_consistent(&model, &domains);
    }

    #[test]
    fn test_word_does_not_support_itself() {
        let model = corner_model();
        let mut domains = Domains::new(&model, &words(&["ABC", "XYZ"]));
        let mut stats = ArcStats::default();

        assert!(revise(&model, &mut domains, 0, 1, &mut stats));
        assert!(domains.is_empty(0));
    }

    #[test]
    fn test_ac3_wipeout_when_only_words_conflict() {
        let model = corner_model();
        let mut domains = Domains::new(&model, &words(&["ABC", "XYZ"]));
        enforce_node_consistency(&model, &mut domains);
        let mut stats = ArcStats::default();

        assert_eq!(
            ac3(&model, &mut domains, None, &mut stats),
            ArcConsistency::Wipeout(0)
        );
    }

    #[test]
    fn test_ac3_wipeout_on_conflicting_domains() {
        let model = corner_model();
        let mut domains = Domains::new(&model, &words(&["ABC", "XYZ"]));
        domains.remove(0, &Word::from("XYZ"));
        domains.remove(1, &Word::from("ABC"));
        let mut stats = ArcStats::default();

        let result = ac3(&model, &mut domains, None, &mut stats);
        assert_eq!(result, ArcConsistency::Wipeout(0));
        assert!(!result.is_consistent());
        assert!(domains.is_empty(0));
    }

    #[test]
    fn test_ac3_propagates_along_a_chain() {
        // a crosses d1 at a[0]/d1[1] and d2 at a[2]/d2[1]; d2 is fixed to "QZQ".
        let a = Variable::across(1, 0, 3);
        let d1 = Variable::down(0, 0, 3);
        let d2 = Variable::down(0, 2, 3);
        let model = ConstraintModel::new(
            vec![a, d1, d2],
            [(a, d1, Overlap(0, 1)), (a, d2, Overlap(2, 1))],
        )
        .unwrap();
        let mut domains = Domains::new(&model, &words(&["CAZ", "BAT", "XCX", "QZQ"]));
        domains.retain(2, |w| *w == Word::from("QZQ"));

        let mut stats = ArcStats::default();
        let result = ac3(&model, &mut domains, Some(vec![Arc::new(0, 2)]), &mut stats);

        assert!(result.is_consistent());
        assert_eq!(names(&domains, 0), vec!["CAZ"]);
        assert_eq!(names(&domains, 1), vec!["XCX"]);
        assert_arc_consistent(&model, &domains);
    }

    #[test]
    fn test_ac3_with_empty_arc_list_changes_nothing() {
        let model = corner_model();
        let mut domains = Domains::new(&model, &words(&["ABC", "XYZ"]));
        let mut stats = ArcStats::default();

        assert!(ac3(&model, &mut domains, Some(vec![]), &mut stats).is_consistent());
        assert_eq!(domains.len(0), 2);
        assert_eq!(stats.arcs_processed, 0);
    }

    #[test]
    fn test_full_consistency_check() {
        let model = corner_model();
        let mut assignment = Assignment::new(2);
        assert!(is_consistent(&model, &assignment));

        assignment.assign(0, Word::from("ABC"));
        assignment.assign(1, Word::from("ABD"));
        assert!(is_consistent(&model, &assignment));

        assignment.assign(1, Word::from("XYZ"));
        assert!(!is_consistent(&model, &assignment), "mismatched overlap");

        assignment.assign(1, Word::from("ABC"));
        assert!(!is_consistent(&model, &assignment), "duplicate word");

        assignment.assign(1, Word::from("AB"));
        assert!(!is_consistent(&model, &assignment), "wrong length");
    }

    #[test]
    fn test_extension_matches_full_check() {
        let model = corner_model();
        let mut assignment = Assignment::new(2);
        assignment.assign(0, Word::from("ABC"));

        for candidate in ["ABD", "XYZ", "ABC", "AB"] {
            let word = Word::from(candidate);
            let mut extended = assignment.clone();
            extended.assign(1, word.clone());
            assert_eq!(
                is_consistent_extension(&model, &assignment, 1, &word),
                is_consistent(&model, &extended),
                "{candidate}"
            );
        }
    }
}
