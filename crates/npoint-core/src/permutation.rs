//! Permutation sets over tuple positions.
//!
//! A permutation `p` relabels tuple position `i` as template position
//! `p(i)`. The matcher accepts a tuple if *some* permutation in the set maps
//! every pair of tuple positions onto a template cell whose distance range
//! contains the pair's distance. This is how positions drawing from the same
//! point set are matched without caring which point landed where.
//!
//! The identity always has id 0.

use std::collections::HashSet;

use crate::error::{NpointError, Result};
use crate::template::DistanceBounds;

/// An immutable set of permutations of `0..tuple_size`, closed under
/// composition.
///
/// # Examples
///
/// ```
/// use npoint_core::Permutations;
///
/// let all = Permutations::symmetric_group(3);
/// assert_eq!(all.len(), 6);
/// assert_eq!(all.row(0), &[0, 1, 2]);
///
/// // Positions 0 and 1 draw from the same set, position 2 from another.
/// let by_set = Permutations::from_labels(&[0, 0, 1]);
/// assert_eq!(by_set.len(), 2);
/// assert_eq!(by_set.get(1, 0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutations {
    tuple_size: usize,
    table: Vec<usize>,
}

impl Permutations {
    /// The trivial set containing only the identity.
    pub fn identity(tuple_size: usize) -> Self {
        Self {
            tuple_size,
            table: (0..tuple_size).collect(),
        }
    }

    /// All `tuple_size!` permutations in lexicographic order.
    pub fn symmetric_group(tuple_size: usize) -> Self {
        Self::filtered(tuple_size, |_| true)
    }

    /// Permutations that only exchange positions carrying equal labels.
    ///
    /// Label positions by the point set they draw from to get the product
    /// of the symmetric groups of each set's positions.
    pub fn from_labels<L: Eq>(labels: &[L]) -> Self {
        Self::filtered(labels.len(), |perm| {
            perm.iter()
                .enumerate()
                .all(|(i, &target)| labels[i] == labels[target])
        })
    }

    /// Builds a set from an explicit list of permutations.
    ///
    /// # Errors
    ///
    /// Returns an error if a row is not a permutation of `0..tuple_size`,
    /// rows repeat, the identity is missing, or the set is not closed under
    /// composition.
    pub fn from_list(tuple_size: usize, list: &[Vec<usize>]) -> Result<Self> {
        let identity: Vec<usize> = (0..tuple_size).collect();
        let mut seen = HashSet::with_capacity(list.len());

        for (id, perm) in list.iter().enumerate() {
            if !is_permutation(perm, tuple_size) {
                return Err(NpointError::Permutation(format!(
                    "entry {id} ({perm:?}) is not a permutation of 0..{tuple_size}"
                )));
            }
            if !seen.insert(perm.as_slice()) {
                return Err(NpointError::Permutation(format!(
                    "entry {id} ({perm:?}) is repeated"
                )));
            }
        }
        if !seen.contains(identity.as_slice()) {
            return Err(NpointError::Permutation("identity is missing".into()));
        }
        for a in list {
            for b in list {
                let composed: Vec<usize> = b.iter().map(|&i| a[i]).collect();
                if !seen.contains(composed.as_slice()) {
                    return Err(NpointError::Permutation(format!(
                        "not closed under composition: {a:?} after {b:?} gives {composed:?}"
                    )));
                }
            }
        }

        let mut table = identity.clone();
        for perm in list.iter().filter(|p| **p != identity) {
            table.extend_from_slice(perm);
        }
        Ok(Self { tuple_size, table })
    }

    fn filtered(tuple_size: usize, keep: impl Fn(&[usize]) -> bool) -> Self {
        let mut current: Vec<usize> = (0..tuple_size).collect();
        let mut table = Vec::new();
        loop {
            if keep(&current) {
                table.extend_from_slice(&current);
            }
            if !next_permutation(&mut current) {
                break;
            }
        }
        Self { tuple_size, table }
    }

    /// Template position that tuple position `position` maps to under
    /// permutation `perm`.
    #[inline]
    pub fn get(&self, perm: usize, position: usize) -> usize {
        self.table[perm * self.tuple_size + position]
    }

    /// The full mapping of permutation `perm`.
    pub fn row(&self, perm: usize) -> &[usize] {
        let start = perm * self.tuple_size;
        &self.table[start..start + self.tuple_size]
    }

    /// Iterates over all permutations in id order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.table.chunks_exact(self.tuple_size.max(1))
    }

    /// Number of permutations in the set.
    pub fn len(&self) -> usize {
        if self.tuple_size == 0 {
            0
        } else {
            self.table.len() / self.tuple_size
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tuple_size(&self) -> usize {
        self.tuple_size
    }

    /// Returns true if relabeling by `perm` leaves every cell of `bounds`
    /// unchanged.
    pub fn is_template_invariant(&self, perm: usize, bounds: &DistanceBounds) -> bool {
        let row = self.row(perm);
        (0..self.tuple_size).all(|i| {
            (0..self.tuple_size).all(|j| {
                i == j
                    || (bounds.lower_sq(row[i], row[j]) == bounds.lower_sq(i, j)
                        && bounds.upper_sq(row[i], row[j]) == bounds.upper_sq(i, j))
            })
        })
    }
}

fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut hit = vec![false; n];
    perm.iter()
        .all(|&i| i < n && !std::mem::replace(&mut hit[i], true))
}

/// Advances `values` to the next lexicographic permutation.
fn next_permutation(values: &mut [usize]) -> bool {
    let n = values.len();
    if n < 2 {
        return false;
    }
    let Some(pivot) = (0..n - 1).rev().find(|&i| values[i] < values[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..n)
        .rev()
        .find(|&j| values[j] > values[pivot])
        .unwrap_or(pivot + 1);
    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let perms = Permutations::identity(4);
        assert_eq!(perms.len(), 1);
        assert_eq!(perms.row(0), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_symmetric_group_sizes() {
        assert_eq!(Permutations::symmetric_group(2).len(), 2);
        assert_eq!(Permutations::symmetric_group(3).len(), 6);
        assert_eq!(Permutations::symmetric_group(4).len(), 24);
    }

    #[test]
    fn test_symmetric_group_is_lexicographic() {
        let perms = Permutations::symmetric_group(3);
        let rows: Vec<&[usize]> = perms.iter().collect();
        assert_eq!(
            rows,
            vec![
                &[0, 1, 2][..],
                &[0, 2, 1][..],
                &[1, 0, 2][..],
                &[1, 2, 0][..],
                &[2, 0, 1][..],
                &[2, 1, 0][..],
            ]
        );
    }

    #[test]
    fn test_from_labels_only_swaps_matching_labels() {
        let perms = Permutations::from_labels(&["D", "R", "D", "R"]);
        assert_eq!(perms.len(), 4);
        for row in perms.iter() {
            assert!(row[0] == 0 || row[0] == 2);
            assert!(row[1] == 1 || row[1] == 3);
        }

        let distinct = Permutations::from_labels(&[0, 1, 2]);
        assert_eq!(distinct.len(), 1);
    }

    #[test]
    fn test_from_list_moves_identity_first() {
        let perms = Permutations::from_list(2, &[vec![1, 0], vec![0, 1]]).unwrap();
        assert_eq!(perms.row(0), &[0, 1]);
        assert_eq!(perms.row(1), &[1, 0]);
    }

    #[test]
    fn test_from_list_rejects_invalid_sets() {
        assert!(Permutations::from_list(2, &[vec![1, 0]]).is_err());
        assert!(Permutations::from_list(2, &[vec![0, 1], vec![0, 0]]).is_err());
        assert!(Permutations::from_list(2, &[vec![0, 1], vec![0, 1]]).is_err());
        // a 3-cycle without its square is not closed
        let err = Permutations::from_list(3, &[vec![0, 1, 2], vec![1, 2, 0]]).unwrap_err();
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn test_from_list_accepts_cyclic_group() {
        let perms =
            Permutations::from_list(3, &[vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]]).unwrap();
        assert_eq!(perms.len(), 3);
    }

    #[test]
    fn test_template_invariance() {
        // Isosceles template: 0-1 is short, 0-2 and 1-2 are long.
        let bounds = DistanceBounds::from_squared(
            vec![
                vec![0.0, 1.0, 4.0],
                vec![1.0, 0.0, 4.0],
                vec![4.0, 4.0, 0.0],
            ],
            vec![
                vec![0.0, 2.0, 9.0],
                vec![2.0, 0.0, 9.0],
                vec![9.0, 9.0, 0.0],
            ],
        )
        .unwrap();
        let perms = Permutations::symmetric_group(3);

        let invariant: Vec<&[usize]> = (0..perms.len())
            .filter(|&p| perms.is_template_invariant(p, &bounds))
            .map(|p| perms.row(p))
            .collect();
        assert_eq!(invariant, vec![&[0, 1, 2][..], &[1, 0, 2][..]]);
    }
}
