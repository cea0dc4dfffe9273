//! Point sets consumed by the matcher.
//!
//! A point set stores coordinates row-major (one point per `dim` values) and
//! one scalar weight per point. Tree nodes refer to points by index range, so
//! tree builders reorder a set with [`PointSet::permuted`] before handing out
//! node ranges.

use crate::error::{NpointError, Result};

/// Whether a point set holds observed data or background (random) points.
///
/// The matcher stratifies results by how many tuple positions were drawn
/// from random sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointSetKind {
    /// Observed (signal) points.
    #[default]
    Data,
    /// Background points drawn from the survey's random catalog.
    Random,
}

/// A weighted set of points of a fixed dimension.
///
/// # Examples
///
/// ```
/// use npoint_core::{PointSet, PointSetKind};
///
/// let set = PointSet::new(2, vec![0.0, 0.0, 3.0, 4.0])
///     .unwrap()
///     .with_weights(vec![1.0, 0.5])
///     .unwrap()
///     .with_kind(PointSetKind::Random);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.point(1), &[3.0, 4.0]);
/// assert_eq!(set.weight(1), 0.5);
/// assert!(set.is_random());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    dim: usize,
    coords: Vec<f64>,
    weights: Vec<f64>,
    kind: PointSetKind,
}

impl PointSet {
    /// Creates a data point set with unit weights.
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is zero, the coordinate count is not a
    /// multiple of `dim`, or any coordinate is not finite.
    pub fn new(dim: usize, coords: Vec<f64>) -> Result<Self> {
        if dim == 0 {
            return Err(NpointError::PointSet("dimension must be at least 1".into()));
        }
        if coords.len() % dim != 0 {
            return Err(NpointError::PointSet(format!(
                "{} coordinates do not divide into points of dimension {dim}",
                coords.len()
            )));
        }
        if let Some(pos) = coords.iter().position(|c| !c.is_finite()) {
            return Err(NpointError::PointSet(format!(
                "non-finite coordinate in point {}",
                pos / dim
            )));
        }
        let weights = vec![1.0; coords.len() / dim];
        Ok(Self {
            dim,
            coords,
            weights,
            kind: PointSetKind::Data,
        })
    }

    /// Creates a data point set from a list of points.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or the points differ in
    /// dimension.
    pub fn from_points(points: &[Vec<f64>]) -> Result<Self> {
        let dim = points
            .first()
            .map(Vec::len)
            .ok_or_else(|| NpointError::PointSet("no points given".into()))?;
        if let Some(bad) = points.iter().position(|p| p.len() != dim) {
            return Err(NpointError::PointSet(format!(
                "point {bad} has dimension {}, expected {dim}",
                points[bad].len()
            )));
        }
        Self::new(dim, points.concat())
    }

    /// Replaces the per-point weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the weight count differs from the point count.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != self.len() {
            return Err(NpointError::PointSet(format!(
                "{} weights given for {} points",
                weights.len(),
                self.len()
            )));
        }
        self.weights = weights;
        Ok(self)
    }

    /// Sets the kind of this set.
    pub fn with_kind(mut self, kind: PointSetKind) -> Self {
        self.kind = kind;
        self
    }

    /// Coordinates of the point at `index`.
    #[inline]
    pub fn point(&self, index: usize) -> &[f64] {
        let start = index * self.dim;
        &self.coords[start..start + self.dim]
    }

    /// Weight of the point at `index`.
    #[inline]
    pub fn weight(&self, index: usize) -> f64 {
        self.weights[index]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn kind(&self) -> PointSetKind {
        self.kind
    }

    pub fn is_random(&self) -> bool {
        self.kind == PointSetKind::Random
    }

    /// Returns a copy whose point `i` is this set's point `order[i]`.
    ///
    /// Coordinates and weights move together. `order` must be a permutation
    /// of `0..len()`.
    pub fn permuted(&self, order: &[usize]) -> Self {
        assert_eq!(order.len(), self.len(), "order must cover every point");
        let mut coords = Vec::with_capacity(self.coords.len());
        let mut weights = Vec::with_capacity(self.len());
        for &index in order {
            coords.extend_from_slice(self.point(index));
            weights.push(self.weights[index]);
        }
        Self {
            dim: self.dim,
            coords,
            weights,
            kind: self.kind,
        }
    }
}
