//! Geometry primitives used by the matcher.
//!
//! The matcher only ever needs squared distances: exact ones between two
//! points, and lower/upper bounds between two bounding regions.

mod hrect;


pub use hrect::HRectBound;

/// Squared Euclidean distance between two points of equal dimension.
///
/// # Examples
///
/// ```
/// use npoint_core::distance_sq;
///
/// assert_eq!(distance_sq(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
/// ```
#[inline]
pub fn distance_sq(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "points must share a dimension");
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// A spatial extent that can bound the distance to another extent of the
/// same kind.
///
/// Implementations must return correct bounds: for every point `a` inside
/// `self` and every point `b` inside `other`,
/// `min_distance_sq(other) <= distance_sq(a, b) <= max_distance_sq(other)`.
/// The pruner relies on this to never discard a valid tuple.
pub trait BoundingRegion {
    /// Lower bound on the squared distance between any two contained points.
    fn min_distance_sq(&self, other: &Self) -> f64;

    /// Upper bound on the squared distance between any two contained points.
    fn max_distance_sq(&self, other: &Self) -> f64;

    /// Returns `(min_distance_sq, max_distance_sq)`.
    fn distance_range_sq(&self, other: &Self) -> (f64, f64) {
        (self.min_distance_sq(other), self.max_distance_sq(other))
    }
}
