//! Clustering output: numbered clusters plus the noise set.

use std::fmt;

use super::store::{PointId, PointStore};
use crate::error::{Error, Result};

/// Identifier of a cluster in a [`ClusteringResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClusterId {
    /// Density cluster, numbered from 0 in creation order.
    Numbered(usize),
    /// Points not density-reachable from any core point.
    Noise,
}

impl ClusterId {
    /// `true` for the noise set.
    pub fn is_noise(self) -> bool {
        matches!(self, ClusterId::Noise)
    }

    /// The cluster number, `None` for noise.
    pub fn number(self) -> Option<usize> {
        match self {
            ClusterId::Numbered(n) => Some(n),
            ClusterId::Noise => None,
        }
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterId::Numbered(n) => write!(f, "{n}"),
            ClusterId::Noise => f.write_str("Noise"),
        }
    }
}

/// A cluster id and its member points, in the order they joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    id: ClusterId,
    points: Vec<PointId>,
}

impl Cluster {
    pub(crate) fn new(id: ClusterId, points: Vec<PointId>) -> Self {
        Self { id, points }
    }

    /// Cluster identifier.
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Member points.
    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` if the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Final assignment of every point to one numbered cluster or to noise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    clusters: Vec<Cluster>,
    noise: Option<Cluster>,
    labels: Vec<ClusterId>,
}

impl ClusteringResult {
    pub(crate) fn new(clusters: Vec<Cluster>, noise: Vec<PointId>, labels: Vec<ClusterId>) -> Self {
        let noise = (!noise.is_empty()).then(|| Cluster::new(ClusterId::Noise, noise));
        Self {
            clusters,
            noise,
            labels,
        }
    }

    /// Number of numbered (non-noise) clusters.
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Numbered clusters in id order, then the noise set if non-empty.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> + '_ {
        self.clusters.iter().chain(self.noise.as_ref())
    }

    /// Look up a cluster by id.
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        match id {
            ClusterId::Numbered(n) => self.clusters.get(n),
            ClusterId::Noise => self.noise.as_ref(),
        }
    }

    /// The noise set, if any point ended up there.
    pub fn noise(&self) -> Option<&Cluster> {
        self.noise.as_ref()
    }

    /// Whether the noise set is non-empty.
    pub fn has_noise(&self) -> bool {
        self.noise.is_some()
    }

    /// Cluster of a point, `None` if the id is out of range.
    pub fn label(&self, point: PointId) -> Option<ClusterId> {
        self.labels.get(point.index()).copied()
    }

    /// One label per distinct point, indexed by [`PointId::index`].
    pub fn labels(&self) -> &[ClusterId] {
        &self.labels
    }

    /// One label per input row of `store`, duplicates included.
    ///
    /// `store` must be the store this result was fitted on.
    pub fn row_labels(&self, store: &PointStore) -> Result<Vec<ClusterId>> {
        if store.len() != self.labels.len() {
            return Err(Error::InvalidParameter {
                name: "store",
                message: "point count differs from the fitted store",
            });
        }
        store
            .row_points()
            .iter()
            .map(|p| {
                self.labels
                    .get(p.index())
                    .copied()
                    .ok_or(Error::UnknownPoint(p.index()))
            })
            .collect()
    }

    /// Coordinates of a cluster's members, for reporting.
    pub fn coordinates<'s>(&self, store: &'s PointStore, cluster: &Cluster) -> Result<Vec<&'s [f64]>> {
        cluster.points().iter().map(|&p| store.point(p)).collect()
    }
}
