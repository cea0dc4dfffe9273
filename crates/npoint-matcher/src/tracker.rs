//! Permutation plausibility tracking.

use smallvec::SmallVec;

/// Which permutations of a template are still plausible for a search
/// branch.
///
/// Entries only ever flip from plausible to implausible. Branches that must
/// not see each other's refinements work on copies; copies are cheap because
/// up to 32 permutations (every relabeling of 4 positions fits) are stored
/// inline.
///
/// # Example
///
/// ```
/// use npoint_matcher::PermutationTracker;
///
/// let mut tracker = PermutationTracker::all_plausible(6);
/// tracker.invalidate(2);
///
/// assert!(!tracker.is_plausible(2));
/// assert_eq!(tracker.plausible_count(), 5);
/// assert_eq!(tracker.plausible().next(), Some(0));
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct PermutationTracker {
    plausible: SmallVec<[bool; 32]>,
}

impl PermutationTracker {
    /// Tracker over `num_permutations` permutations, all plausible.
    pub fn all_plausible(num_permutations: usize) -> Self {
        Self {
            plausible: SmallVec::from_elem(true, num_permutations),
        }
    }

    #[inline]
    pub fn is_plausible(&self, perm: usize) -> bool {
        self.plausible[perm]
    }

    /// Marks `perm` implausible for the rest of this branch.
    #[inline]
    pub fn invalidate(&mut self, perm: usize) {
        self.plausible[perm] = false;
    }

    /// Returns true if at least one permutation is still plausible.
    #[inline]
    pub fn any_plausible(&self) -> bool {
        self.plausible.iter().any(|&p| p)
    }

    pub fn plausible_count(&self) -> usize {
        self.plausible.iter().filter(|&&p| p).count()
    }

    /// Ids of the still-plausible permutations, ascending.
    pub fn plausible(&self) -> impl Iterator<Item = usize> + '_ {
        self.plausible
            .iter()
            .enumerate()
            .filter_map(|(perm, &p)| p.then_some(perm))
    }

    /// Number of permutations tracked.
    pub fn len(&self) -> usize {
        self.plausible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plausible.is_empty()
    }
}

impl Clone for PermutationTracker {
    fn clone(&self) -> Self {
        Self {
            plausible: self.plausible.clone(),
        }
    }

    // Reuses the existing buffer; the base case resets once per candidate.
    fn clone_from(&mut self, source: &Self) {
        self.plausible.clone_from(&source.plausible);
    }
}
