//! Deterministic point clouds.
//!
//! Every fixture returns a `Data` set with unit weights; chain
//! [`PointSet::with_kind`] to turn it into a random catalog.

use npoint_core::PointSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One-dimensional points at the given coordinates.
///
/// # Example
///
/// ```
/// use npoint_test::line_points;
///
/// let set = line_points(&[0.0, 1.0, 2.0, 5.0]);
/// assert_eq!(set.len(), 4);
/// assert_eq!(set.point(3), &[5.0]);
/// ```
pub fn line_points(xs: &[f64]) -> PointSet {
    PointSet::new(1, xs.to_vec()).expect("line coordinates must be finite")
}

/// A `nx` by `ny` grid with the given spacing, row-major.
///
/// Point `y * nx + x` sits at `(x * spacing, y * spacing)`.
pub fn grid_points(nx: usize, ny: usize, spacing: f64) -> PointSet {
    let coords = (0..ny)
        .flat_map(|y| (0..nx).flat_map(move |x| [x as f64 * spacing, y as f64 * spacing]))
        .collect();
    PointSet::new(2, coords).expect("grid spacing must be finite")
}

/// `n` points uniform in the unit cube of dimension `dim`.
///
/// The same seed always yields the same set.
pub fn random_points(n: usize, dim: usize, seed: u64) -> PointSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let coords = (0..n * dim).map(|_| rng.random_range(0.0..1.0)).collect();
    PointSet::new(dim, coords).expect("dimension must be at least 1")
}

/// Attaches weights to a fixture set.
pub fn weighted(set: PointSet, weights: &[f64]) -> PointSet {
    set.with_weights(weights.to_vec())
        .expect("one weight per point")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let grid = grid_points(3, 2, 0.5);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.point(4), &[0.5, 0.5]);
    }

    #[test]
    fn test_random_points_reproducible() {
        let a = random_points(20, 3, 7);
        let b = random_points(20, 3, 7);
        let c = random_points(20, 3, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!((0..a.len()).all(|i| a.point(i).iter().all(|&x| (0.0..1.0).contains(&x))));
    }
}
