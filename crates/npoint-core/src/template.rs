//! The matcher template: what a matching tuple looks like.
//!
//! A template fixes the tuple arity, the squared-distance range every pair
//! of template positions must fall in, how many positions are designated
//! random, and the permutations under which the template is considered
//! equivalent. Templates are built once per query and shared read-only.

use crate::error::{NpointError, Result};
use crate::permutation::Permutations;

/// Symmetric lower/upper squared-distance matrices.
///
/// Entry `(i, j)` is the admissible squared-distance range between template
/// positions `i` and `j`. The diagonal is never consulted.
///
/// # Examples
///
/// ```
/// use npoint_core::DistanceBounds;
///
/// // Distances (not squared) between 1 and 2 for every pair of a triangle.
/// let bounds = DistanceBounds::uniform(3, 1.0, 4.0).unwrap();
/// assert!(bounds.contains(0, 2, 2.5));
/// assert!(!bounds.contains(1, 2, 4.5));
///
/// let squared = DistanceBounds::from_distances(
///     vec![vec![0.0, 1.0], vec![1.0, 0.0]],
///     vec![vec![0.0, 2.0], vec![2.0, 0.0]],
/// ).unwrap();
/// assert_eq!(squared.upper_sq(0, 1), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBounds {
    size: usize,
    lower_sq: Vec<f64>,
    upper_sq: Vec<f64>,
}

impl DistanceBounds {
    /// Creates bounds from squared-distance matrices.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrices are not square and of equal size, are
    /// not symmetric, contain negative or NaN entries, or have an off-diagonal
    /// lower bound above its upper bound.
    pub fn from_squared(lower: Vec<Vec<f64>>, upper: Vec<Vec<f64>>) -> Result<Self> {
        let size = lower.len();
        check_square("lower", &lower, size)?;
        check_square("upper", &upper, size)?;

        for i in 0..size {
            for j in (i + 1)..size {
                let (lo, hi) = (lower[i][j], upper[i][j]);
                if lo != lower[j][i] || hi != upper[j][i] {
                    return Err(NpointError::Template(format!(
                        "bounds are not symmetric at ({i}, {j})"
                    )));
                }
                if lo.is_nan() || hi.is_nan() || lo < 0.0 || !lo.is_finite() {
                    return Err(NpointError::Template(format!(
                        "invalid range [{lo}, {hi}] at ({i}, {j})"
                    )));
                }
                if lo > hi {
                    return Err(NpointError::Template(format!(
                        "lower bound {lo} exceeds upper bound {hi} at ({i}, {j})"
                    )));
                }
            }
        }

        Ok(Self {
            size,
            lower_sq: lower.concat(),
            upper_sq: upper.concat(),
        })
    }

    /// Creates bounds from plain (non-squared) distance matrices.
    ///
    /// # Errors
    ///
    /// See [`DistanceBounds::from_squared`]; negative distances are rejected
    /// before squaring.
    pub fn from_distances(lower: Vec<Vec<f64>>, upper: Vec<Vec<f64>>) -> Result<Self> {
        let negative = lower
            .iter()
            .chain(&upper)
            .flatten()
            .any(|&d| d < 0.0);
        if negative {
            return Err(NpointError::Template("distances must be non-negative".into()));
        }
        let square = |m: Vec<Vec<f64>>| -> Vec<Vec<f64>> {
            m.into_iter()
                .map(|row| row.into_iter().map(|d| d * d).collect())
                .collect()
        };
        Self::from_squared(square(lower), square(upper))
    }

    /// Same squared range `[lower_sq, upper_sq]` for every pair.
    ///
    /// # Errors
    ///
    /// See [`DistanceBounds::from_squared`].
    pub fn uniform(size: usize, lower_sq: f64, upper_sq: f64) -> Result<Self> {
        let lower = (0..size)
            .map(|i| (0..size).map(|j| if i == j { 0.0 } else { lower_sq }).collect())
            .collect();
        let upper = (0..size)
            .map(|i| (0..size).map(|j| if i == j { 0.0 } else { upper_sq }).collect())
            .collect();
        Self::from_squared(lower, upper)
    }

    /// Number of template positions.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn lower_sq(&self, i: usize, j: usize) -> f64 {
        self.lower_sq[i * self.size + j]
    }

    #[inline]
    pub fn upper_sq(&self, i: usize, j: usize) -> f64 {
        self.upper_sq[i * self.size + j]
    }

    /// Returns true if `dist_sq` lies in the closed range of cell `(i, j)`.
    #[inline]
    pub fn contains(&self, i: usize, j: usize, dist_sq: f64) -> bool {
        dist_sq >= self.lower_sq(i, j) && dist_sq <= self.upper_sq(i, j)
    }
}

fn check_square(name: &str, matrix: &[Vec<f64>], size: usize) -> Result<()> {
    if matrix.len() != size {
        return Err(NpointError::Template(format!(
            "{name} bounds have {} rows, expected {size}",
            matrix.len()
        )));
    }
    if let Some(row) = matrix.iter().position(|r| r.len() != size) {
        return Err(NpointError::Template(format!(
            "{name} bounds row {row} has {} entries, expected {size}",
            matrix[row].len()
        )));
    }
    Ok(())
}

/// Immutable description of the tuples to count.
///
/// # Examples
///
/// ```
/// use npoint_core::{DistanceBounds, MatcherTemplate, Permutations};
///
/// let template = MatcherTemplate::new(
///     DistanceBounds::uniform(3, 1.0, 4.0).unwrap(),
///     1,
///     Permutations::symmetric_group(3),
/// ).unwrap();
///
/// assert_eq!(template.tuple_size(), 3);
/// assert_eq!(template.num_permutations(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherTemplate {
    bounds: DistanceBounds,
    num_random: usize,
    permutations: Permutations,
}

impl MatcherTemplate {
    /// Creates a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the arity is below 2, the permutation set is
    /// over a different arity, or `num_random` exceeds the arity.
    pub fn new(
        bounds: DistanceBounds,
        num_random: usize,
        permutations: Permutations,
    ) -> Result<Self> {
        let tuple_size = bounds.size();
        if tuple_size < 2 {
            return Err(NpointError::Template(format!(
                "tuple size must be at least 2, got {tuple_size}"
            )));
        }
        if permutations.tuple_size() != tuple_size {
            return Err(NpointError::Template(format!(
                "permutations act on {} positions, template has {tuple_size}",
                permutations.tuple_size()
            )));
        }
        if num_random > tuple_size {
            return Err(NpointError::Template(format!(
                "{num_random} random positions exceed tuple size {tuple_size}"
            )));
        }
        Ok(Self {
            bounds,
            num_random,
            permutations,
        })
    }

    /// Template over identity-only permutations with no random positions.
    ///
    /// # Errors
    ///
    /// See [`MatcherTemplate::new`].
    pub fn exact(bounds: DistanceBounds) -> Result<Self> {
        let size = bounds.size();
        Self::new(bounds, 0, Permutations::identity(size))
    }

    pub fn tuple_size(&self) -> usize {
        self.bounds.size()
    }

    pub fn num_random(&self) -> usize {
        self.num_random
    }

    pub fn bounds(&self) -> &DistanceBounds {
        &self.bounds
    }

    pub fn permutations(&self) -> &Permutations {
        &self.permutations
    }

    pub fn num_permutations(&self) -> usize {
        self.permutations.len()
    }

    /// Template cell that tuple positions `(i, j)` map to under `perm`.
    #[inline]
    pub fn permuted_cell(&self, perm: usize, i: usize, j: usize) -> (usize, usize) {
        (self.permutations.get(perm, i), self.permutations.get(perm, j))
    }
}
