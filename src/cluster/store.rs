//! Point storage and epsilon-neighborhood queries.
//!
//! Points are identified by value: two input rows with the same coordinate
//! tuple are the same point. [`PointStore::load`] collapses such rows into a
//! single [`PointId`] (first occurrence wins the position) and keeps a
//! row -> point map so callers can still label every input row.
//!
//! Density still counts rows: a neighbor loaded three times weighs three in
//! [`PointStore::row_count`].
//!
//! Neighborhood queries are brute force: one distance per stored point,
//! O(n) per query and O(n²) for a full clustering run.

use std::collections::HashMap;
use std::fmt;

use super::util;
use crate::error::{Error, Result};

/// Index of a distinct point inside a [`PointStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub(crate) usize);

impl PointId {
    /// Position of the point in the store (first-seen order).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable collection of points answering eps-radius queries.
#[derive(Debug, Clone)]
pub struct PointStore {
    points: Vec<Vec<f64>>,
    // Input rows folded into each point.
    counts: Vec<usize>,
    row_points: Vec<PointId>,
    dim: usize,
}

impl PointStore {
    /// Build a store from rows of coordinates.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `rows` is empty.
    /// - [`Error::ZeroDimension`] if the rows have no coordinates.
    /// - [`Error::DimensionMismatch`] if a row's arity differs from the first row.
    /// - [`Error::NonFinite`] if any coordinate is NaN or infinite.
    pub fn load(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = match rows.first() {
            Some(first) => first.len(),
            None => return Err(Error::EmptyInput),
        };
        if dim == 0 {
            return Err(Error::ZeroDimension);
        }

        let mut points: Vec<Vec<f64>> = Vec::with_capacity(rows.len());
        let mut counts: Vec<usize> = Vec::with_capacity(rows.len());
        let mut row_points = Vec::with_capacity(rows.len());
        let mut seen: HashMap<Vec<u64>, PointId> = HashMap::with_capacity(rows.len());

        for (row, coords) in rows.into_iter().enumerate() {
            if coords.len() != dim {
                return Err(Error::DimensionMismatch {
                    row,
                    expected: dim,
                    found: coords.len(),
                });
            }
            if let Some(column) = coords.iter().position(|c| !c.is_finite()) {
                return Err(Error::NonFinite { row, column });
            }

            let key = util::value_key(&coords);
            let id = *seen.entry(key).or_insert_with(|| {
                points.push(coords);
                counts.push(0);
                PointId(points.len() - 1)
            });
            counts[id.0] += 1;
            row_points.push(id);
        }

        Ok(Self {
            points,
            counts,
            row_points,
            dim,
        })
    }

    /// Number of distinct points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a loaded store; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of input rows, duplicates included.
    pub fn n_rows(&self) -> usize {
        self.row_points.len()
    }

    /// Arity shared by every point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinates of a point.
    pub fn point(&self, id: PointId) -> Result<&[f64]> {
        self.points
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownPoint(id.0))
    }

    /// Number of input rows carrying this point's coordinates (0 if unknown).
    pub fn multiplicity(&self, id: PointId) -> usize {
        self.counts.get(id.0).copied().unwrap_or(0)
    }

    /// Number of input rows behind a set of points, e.g. a neighborhood.
    pub fn row_count(&self, points: &[PointId]) -> usize {
        points.iter().map(|&p| self.multiplicity(p)).sum()
    }

    /// The distinct point an input row was folded into.
    pub fn row_point(&self, row: usize) -> Option<PointId> {
        self.row_points.get(row).copied()
    }

    /// All row -> point assignments, in input order.
    pub fn row_points(&self) -> &[PointId] {
        &self.row_points
    }

    /// Distinct points with their ids, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &[f64])> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, p)| (PointId(idx), p.as_slice()))
    }

    /// Every stored point within `eps` of `target`, measured on the first
    /// `cluster_dim` coordinates. The boundary is inclusive.
    ///
    /// Points equal in value to `target` are never reported. Results come
    /// back in store order, one id per distinct point; use
    /// [`PointStore::row_count`] for the number of rows they stand for.
    ///
    /// # Errors
    ///
    /// Config errors when `cluster_dim` is 0 or exceeds the point arity, when
    /// `target` has a different arity than the stored points, or when `eps`
    /// is not a positive finite number.
    pub fn region_query(&self, target: &[f64], cluster_dim: usize, eps: f64) -> Result<Vec<PointId>> {
        check_cluster_dim(cluster_dim, self.dim)?;
        check_eps(eps)?;
        if target.len() != self.dim {
            return Err(Error::InvalidParameter {
                name: "target",
                message: "arity differs from stored points",
            });
        }

        Ok(self.scan(target, cluster_dim, eps))
    }

    /// Neighborhood of a stored point. Parameters must already be validated.
    pub(crate) fn neighbors(&self, id: PointId, cluster_dim: usize, eps: f64) -> Vec<PointId> {
        self.scan(&self.points[id.0], cluster_dim, eps)
    }

    fn scan(&self, target: &[f64], cluster_dim: usize, eps: f64) -> Vec<PointId> {
        let lead = &target[..cluster_dim];
        self.points
            .iter()
            .enumerate()
            .filter(|(_, other)| {
                other.as_slice() != target && util::euclidean(lead, &other[..cluster_dim]) <= eps
            })
            .map(|(idx, _)| PointId(idx))
            .collect()
    }
}

pub(crate) fn check_cluster_dim(cluster_dim: usize, arity: usize) -> Result<()> {
    if cluster_dim == 0 {
        return Err(Error::InvalidParameter {
            name: "cluster_dim",
            message: "must be at least 1",
        });
    }
    if cluster_dim > arity {
        return Err(Error::ClusterDimTooLarge {
            requested: cluster_dim,
            arity,
        });
    }
    Ok(())
}

pub(crate) fn check_eps(eps: f64) -> Result<()> {
    if !(eps.is_finite() && eps > 0.0) {
        return Err(Error::InvalidParameter {
            name: "eps",
            message: "must be a positive finite number",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_plus_outlier() -> PointStore {
        PointStore::load(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![100.0, 100.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_load_rejects_empty() {
        assert_eq!(PointStore::load(vec![]).unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_load_rejects_ragged_rows() {
        let err = PointStore::load(vec![vec![0.0, 0.0], vec![1.0, 2.0, 3.0]]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                row: 1,
                expected: 2,
                found: 3
            }
        );
        assert!(err.is_data());
    }

    #[test]
    fn test_load_rejects_nan() {
        let err = PointStore::load(vec![vec![0.0, f64::NAN]]).unwrap_err();
        assert_eq!(err, Error::NonFinite { row: 0, column: 1 });
    }

    #[test]
    fn test_load_rejects_zero_arity() {
        assert_eq!(
            PointStore::load(vec![vec![], vec![]]).unwrap_err(),
            Error::ZeroDimension
        );
    }

    #[test]
    fn test_duplicate_rows_collapse() {
        let store = PointStore::load(vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![1.0, 2.0],
            vec![-0.0, 0.0],
            vec![0.0, 0.0],
        ])
        .unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.n_rows(), 5);
        assert_eq!(store.row_point(2), Some(PointId(0)));
        assert_eq!(store.row_point(4), Some(PointId(2)));
        assert_eq!(store.row_point(5), None);
        assert_eq!(store.multiplicity(PointId(0)), 2);
        assert_eq!(store.multiplicity(PointId(1)), 1);
        assert_eq!(store.multiplicity(PointId(2)), 2);
        assert_eq!(store.multiplicity(PointId(7)), 0);
    }

    #[test]
    fn test_neighborhood_weight_counts_rows() {
        let store = PointStore::load(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 0.0],
        ])
        .unwrap();

        let hood = store.region_query(&[0.0, 0.0], 2, 1.5).unwrap();
        assert_eq!(hood, vec![PointId(1)]);
        assert_eq!(store.row_count(&hood), 2);
    }

    #[test]
    fn test_region_query_excludes_target() {
        let store = square_plus_outlier();
        let hits = store.region_query(&[0.0, 0.0], 2, 1.5).unwrap();
        assert_eq!(hits, vec![PointId(1), PointId(2), PointId(3)]);

        let lonely = store.region_query(&[100.0, 100.0], 2, 1.5).unwrap();
        assert!(lonely.is_empty());
    }

    #[test]
    fn test_region_query_boundary_is_inclusive() {
        let store = square_plus_outlier();
        let hits = store.region_query(&[0.0, 0.0], 2, 1.0).unwrap();
        assert_eq!(hits, vec![PointId(1), PointId(2)]);
    }

    #[test]
    fn test_region_query_uses_leading_coordinates_only() {
        let store = PointStore::load(vec![vec![0.0, 0.0, 0.0], vec![0.5, 0.0, 50.0]]).unwrap();

        let flat = store.region_query(&[0.0, 0.0, 0.0], 2, 1.0).unwrap();
        assert_eq!(flat, vec![PointId(1)]);

        let full = store.region_query(&[0.0, 0.0, 0.0], 3, 1.0).unwrap();
        assert!(full.is_empty());
    }

    #[test]
    fn test_region_query_invalid_params() {
        let store = square_plus_outlier();

        let err = store.region_query(&[0.0, 0.0], 3, 1.0).unwrap_err();
        assert_eq!(
            err,
            Error::ClusterDimTooLarge {
                requested: 3,
                arity: 2
            }
        );
        assert!(store.region_query(&[0.0, 0.0], 0, 1.0).unwrap_err().is_config());
        assert!(store.region_query(&[0.0, 0.0], 2, 0.0).unwrap_err().is_config());
        assert!(store.region_query(&[0.0, 0.0], 2, -1.0).unwrap_err().is_config());
        assert!(store.region_query(&[0.0, 0.0], 2, f64::NAN).unwrap_err().is_config());
        assert!(store.region_query(&[0.0], 1, 1.0).unwrap_err().is_config());
    }

    #[test]
    fn test_point_lookup() {
        let store = square_plus_outlier();
        assert_eq!(store.point(PointId(4)).unwrap(), &[100.0, 100.0]);
        assert_eq!(store.point(PointId(9)).unwrap_err(), Error::UnknownPoint(9));
        assert_eq!(store.iter().count(), 5);
    }
}
