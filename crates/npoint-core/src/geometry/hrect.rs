//! Axis-aligned hyper-rectangle bound.

use std::ops::Range;

use crate::error::{NpointError, Result};
use crate::points::PointSet;

use super::BoundingRegion;

/// An axis-aligned bounding box in `dim` dimensions.
///
/// An empty bound (see [`HRectBound::empty`]) has inverted intervals and
/// becomes valid after the first call to [`HRectBound::enclose`].
///
/// # Examples
///
/// ```
/// use npoint_core::{BoundingRegion, HRectBound};
///
/// let a = HRectBound::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
/// let b = HRectBound::new(vec![3.0, 0.0], vec![4.0, 1.0]).unwrap();
///
/// assert_eq!(a.min_distance_sq(&b), 4.0);
/// assert_eq!(a.max_distance_sq(&b), 17.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HRectBound {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl HRectBound {
    /// Creates a bound from per-dimension minima and maxima.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length, are empty, or any
    /// interval is inverted.
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Result<Self> {
        if min.is_empty() || min.len() != max.len() {
            return Err(NpointError::Template(format!(
                "bound needs matching non-empty extents, got {} and {}",
                min.len(),
                max.len()
            )));
        }
        if let Some(d) = (0..min.len()).find(|&d| min[d] > max[d]) {
            return Err(NpointError::Template(format!(
                "inverted interval in dimension {d}: [{}, {}]",
                min[d], max[d]
            )));
        }
        Ok(Self { min, max })
    }

    /// Creates an empty bound that encloses nothing.
    pub fn empty(dim: usize) -> Self {
        Self {
            min: vec![f64::INFINITY; dim],
            max: vec![f64::NEG_INFINITY; dim],
        }
    }

    /// Creates the tightest bound around the points of `set` in `range`.
    pub fn from_points(set: &PointSet, range: Range<usize>) -> Self {
        let mut bound = Self::empty(set.dim());
        for index in range {
            bound.enclose(set.point(index));
        }
        bound
    }

    /// Grows the bound to contain `point`.
    pub fn enclose(&mut self, point: &[f64]) {
        debug_assert_eq!(point.len(), self.dim());
        for (d, &x) in point.iter().enumerate() {
            if x < self.min[d] {
                self.min[d] = x;
            }
            if x > self.max[d] {
                self.max[d] = x;
            }
        }
    }

    /// Returns true if `point` lies inside the bound (boundary included).
    pub fn contains(&self, point: &[f64]) -> bool {
        point
            .iter()
            .enumerate()
            .all(|(d, &x)| x >= self.min[d] && x <= self.max[d])
    }

    /// Returns true if no point has been enclosed yet.
    pub fn is_empty(&self) -> bool {
        self.min.iter().zip(&self.max).any(|(lo, hi)| lo > hi)
    }

    pub fn dim(&self) -> usize {
        self.min.len()
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Extent of the bound along dimension `d`.
    pub fn width(&self, d: usize) -> f64 {
        (self.max[d] - self.min[d]).max(0.0)
    }

    /// Dimension with the largest extent (the first one on ties).
    pub fn widest_dimension(&self) -> usize {
        (0..self.dim())
            .fold((0, f64::NEG_INFINITY), |(best, best_width), d| {
                let width = self.width(d);
                if width > best_width {
                    (d, width)
                } else {
                    (best, best_width)
                }
            })
            .0
    }
}

impl BoundingRegion for HRectBound {
    fn min_distance_sq(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        (0..self.dim())
            .map(|d| {
                let gap = (other.min[d] - self.max[d])
                    .max(self.min[d] - other.max[d])
                    .max(0.0);
                gap * gap
            })
            .sum()
    }

    fn max_distance_sq(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        (0..self.dim())
            .map(|d| {
                let span = (other.max[d] - self.min[d]).max(self.max[d] - other.min[d]);
                span * span
            })
            .sum()
    }
}
