//! Duplicate-solution filter.
//!
//! Two sequences are the same reconstruction when their placement keys
//! (everything but the current-frame row) are equal as multisets; discovery
//! order does not matter.

use glue_core::EncodedOperation;
use rustc_hash::FxHashSet;

/// One placement sequence in discovery order.
pub type Sequence = Vec<EncodedOperation>;

fn sorted_keys(sequence: &[EncodedOperation]) -> Vec<u32> {
    let mut keys: Vec<u32> = sequence.iter().map(|op| op.placement_key()).collect();
    keys.sort_unstable();
    keys
}

/// True when every key of `sub` appears in `sup` at least as often.
/// Both slices must be sorted.
fn is_sub_multiset(sub: &[u32], sup: &[u32]) -> bool {
    let mut rest = sup.iter();
    sub.iter().all(|key| rest.by_ref().any(|other| other == key))
}

pub fn is_duplicate(candidate: &[EncodedOperation], existing: &[Sequence]) -> bool {
    let keys = sorted_keys(candidate);
    existing
        .iter()
        .any(|sequence| sequence.len() == candidate.len() && sorted_keys(sequence) == keys)
}

/// Whether a partial sequence is already contained in some solution.
pub fn is_partial_duplicate(partial: &[EncodedOperation], existing: &[Sequence]) -> bool {
    let keys = sorted_keys(partial);
    existing
        .iter()
        .any(|sequence| is_sub_multiset(&keys, &sorted_keys(sequence)))
}

/// Distinct solutions for one board, in discovery order, indexed by their
/// sorted placement keys.
#[derive(Clone, Debug, Default)]
pub struct SolutionSet {
    solutions: Vec<Sequence>,
    index: FxHashSet<Vec<u32>>,
}

impl SolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_duplicate(&self, candidate: &[EncodedOperation]) -> bool {
        self.index.contains(&sorted_keys(candidate))
    }

    pub fn is_partial_duplicate(&self, partial: &[EncodedOperation]) -> bool {
        let keys = sorted_keys(partial);
        self.index.iter().any(|solution| is_sub_multiset(&keys, solution))
    }

    /// Adds the sequence unless an equivalent one is already present.
    pub fn insert(&mut self, sequence: Sequence) -> bool {
        let keys = sorted_keys(&sequence);
        if !self.index.insert(keys) {
            return false;
        }
        self.solutions.push(sequence);
        true
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.solutions.iter()
    }

    pub fn as_slice(&self) -> &[Sequence] {
        &self.solutions
    }

    pub fn into_vec(self) -> Vec<Sequence> {
        self.solutions
    }
}
