//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups points based on neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Automatically determines the number of clusters
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors.
//! - **MinPts**: Minimum neighborhood size for a point to be "core".
//! - **Core point**: Has at least MinPts points within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. For each unvisited point P, in dataset order:
//!    - Mark it visited and find its neighbors within ε
//!    - If the neighborhood is too small, put P in noise (may change later)
//!    - Else P is core: open the next numbered cluster and expand it
//!
//! 2. Expansion works through a growing seed list:
//!    - An unvisited seed is visited and queried; if it is core, its
//!      neighbors not yet queued are appended to the list
//!    - The seed joins the cluster unless another cluster already owns it
//!
//! ## Border points
//!
//! A border point belongs to the first cluster whose expansion reaches it and
//! is never reassigned afterwards. A point parked in noise is moved into the
//! first cluster that reaches it, so no point ends up both in noise and in a
//! numbered cluster.
//!
//! ## Counting MinPts
//!
//! A neighborhood is measured in input rows: a neighbor loaded twice counts
//! twice, while copies of the point itself never count. By default only
//! neighbors count toward `min_points`. Setting [`DbscanParams::count_self`]
//! adds the point itself, the textbook convention under which
//! `min_points = 1` makes every point core.
//!
//! ## Complexity
//!
//! - **Time**: O(n²): one brute-force region query per point.
//! - **Space**: O(n) for labels and traversal flags.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::result::{Cluster, ClusterId, ClusteringResult};
use super::store::{self, PointId, PointStore};
use super::traits::Clustering;
use crate::error::{Error, Result};

/// Label returned by the slice-based APIs for noise points.
pub const NOISE: usize = usize::MAX;

/// DBSCAN configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbscanParams {
    /// Neighborhood radius. Must be positive and finite.
    pub eps: f64,
    /// Minimum neighborhood size for a core point. Must be at least 1.
    pub min_points: usize,
    /// Number of leading coordinates used for distances; `None` uses all.
    pub cluster_dim: Option<usize>,
    /// Whether a point counts toward its own neighborhood size.
    pub count_self: bool,
}

impl Default for DbscanParams {
    /// `eps = 2.5`, `min_points = 2`, all coordinates, neighbors only.
    fn default() -> Self {
        Self {
            eps: 2.5,
            min_points: 2,
            cluster_dim: None,
            count_self: false,
        }
    }
}

impl DbscanParams {
    /// Check every parameter against points of arity `dim`.
    ///
    /// Returns the effective clustering dimension.
    pub fn validate(&self, dim: usize) -> Result<usize> {
        store::check_eps(self.eps)?;
        if self.min_points == 0 {
            return Err(Error::InvalidParameter {
                name: "min_points",
                message: "must be at least 1",
            });
        }
        let cluster_dim = self.cluster_dim.unwrap_or(dim);
        store::check_cluster_dim(cluster_dim, dim)?;
        Ok(cluster_dim)
    }

    fn is_core(&self, neighbor_rows: usize) -> bool {
        neighbor_rows + usize::from(self.count_self) >= self.min_points
    }
}

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dbscan {
    params: DbscanParams,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer over all coordinates.
    ///
    /// # Arguments
    ///
    /// * `eps` - Maximum distance between two points to be neighbors.
    /// * `min_points` - Minimum neighborhood size of a core point.
    pub fn new(eps: f64, min_points: usize) -> Self {
        Self {
            params: DbscanParams {
                eps,
                min_points,
                cluster_dim: None,
                count_self: false,
            },
        }
    }

    /// Create a clusterer from a parameter set.
    pub fn from_params(params: DbscanParams) -> Self {
        Self { params }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.params.eps = eps;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.params.min_points = min_points;
        self
    }

    /// Measure distances on the first `cluster_dim` coordinates only.
    pub fn with_cluster_dim(mut self, cluster_dim: usize) -> Self {
        self.params.cluster_dim = Some(cluster_dim);
        self
    }

    /// Choose whether a point counts toward its own neighborhood size.
    pub fn with_count_self(mut self, count_self: bool) -> Self {
        self.params.count_self = count_self;
        self
    }

    /// Current parameters.
    pub fn params(&self) -> &DbscanParams {
        &self.params
    }

    /// Cluster every point of `store`.
    ///
    /// Parameters are validated before the traversal starts; on error no
    /// partial result is produced.
    pub fn fit(&self, store: &PointStore) -> Result<ClusteringResult> {
        let cluster_dim = self.params.validate(store.dim())?;
        debug!(
            points = store.len(),
            eps = self.params.eps,
            min_points = self.params.min_points,
            cluster_dim,
            "dbscan: starting traversal"
        );

        let result = Traversal::new(store, &self.params, cluster_dim).run();

        debug!(
            clusters = result.n_clusters(),
            noise = result.noise().map_or(0, Cluster::len),
            "dbscan: traversal finished"
        );
        Ok(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unassigned,
    Noise,
    Cluster(usize),
}

/// Mutable state of a single run. Never shared between runs.
struct Traversal<'a> {
    store: &'a PointStore,
    params: &'a DbscanParams,
    cluster_dim: usize,
    visited: Vec<bool>,
    labels: Vec<Label>,
    // Expansion stamp (cluster id + 1) of the seed list a point was queued in.
    queued: Vec<usize>,
    clusters: Vec<Vec<PointId>>,
    noise: Vec<PointId>,
}

impl<'a> Traversal<'a> {
    fn new(store: &'a PointStore, params: &'a DbscanParams, cluster_dim: usize) -> Self {
        let n = store.len();
        Self {
            store,
            params,
            cluster_dim,
            visited: vec![false; n],
            labels: vec![Label::Unassigned; n],
            queued: vec![0; n],
            clusters: Vec::new(),
            noise: Vec::new(),
        }
    }

    fn region_query(&self, point: PointId) -> Vec<PointId> {
        self.store.neighbors(point, self.cluster_dim, self.params.eps)
    }

    fn is_core(&self, neighbors: &[PointId]) -> bool {
        self.params.is_core(self.store.row_count(neighbors))
    }

    fn run(mut self) -> ClusteringResult {
        for idx in 0..self.store.len() {
            if self.visited[idx] {
                continue;
            }
            self.visited[idx] = true;

            let point = PointId(idx);
            let neighbors = self.region_query(point);

            if !self.is_core(&neighbors) {
                // Not enough neighbors: noise for now, may become a border point later.
                self.labels[idx] = Label::Noise;
                self.noise.push(point);
                continue;
            }

            self.expand_cluster(point, neighbors);
        }

        self.finish()
    }

    fn expand_cluster(&mut self, seed: PointId, neighbors: Vec<PointId>) {
        let cluster_id = self.clusters.len();
        let stamp = cluster_id + 1;

        self.labels[seed.0] = Label::Cluster(cluster_id);
        self.clusters.push(vec![seed]);

        self.queued[seed.0] = stamp;
        for p in &neighbors {
            self.queued[p.0] = stamp;
        }

        // Index-based worklist: the list grows while it is being walked.
        let mut seeds = neighbors;
        let mut cursor = 0;
        while cursor < seeds.len() {
            let p = seeds[cursor];
            cursor += 1;

            if !self.visited[p.0] {
                self.visited[p.0] = true;
                let reachable = self.region_query(p);
                if self.is_core(&reachable) {
                    for n in reachable {
                        if self.queued[n.0] != stamp {
                            self.queued[n.0] = stamp;
                            seeds.push(n);
                        }
                    }
                }
            }

            match self.labels[p.0] {
                Label::Unassigned => self.assign(p, cluster_id),
                Label::Noise => {
                    trace!(point = p.0, cluster = cluster_id, "dbscan: noise point became border");
                    self.assign(p, cluster_id);
                }
                // First-reaching cluster keeps its border points.
                Label::Cluster(_) => {}
            }
        }

        trace!(
            cluster = cluster_id,
            size = self.clusters[cluster_id].len(),
            "dbscan: cluster formed"
        );
    }

    fn assign(&mut self, p: PointId, cluster_id: usize) {
        self.labels[p.0] = Label::Cluster(cluster_id);
        self.clusters[cluster_id].push(p);
    }

    fn finish(self) -> ClusteringResult {
        let Traversal {
            labels,
            clusters,
            mut noise,
            ..
        } = self;

        noise.retain(|p| labels[p.0] == Label::Noise);

        let labels: Vec<ClusterId> = labels
            .into_iter()
            .map(|l| match l {
                Label::Cluster(c) => ClusterId::Numbered(c),
                // Every point is visited, so nothing stays unassigned.
                Label::Noise | Label::Unassigned => ClusterId::Noise,
            })
            .collect();

        let clusters = clusters
            .into_iter()
            .enumerate()
            .map(|(id, points)| Cluster::new(ClusterId::Numbered(id), points))
            .collect();

        ClusteringResult::new(clusters, noise, labels)
    }
}

impl Clustering for Dbscan {
    /// One label per input row; noise rows get [`NOISE`].
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let labels = self.fit_predict_with_noise(data)?;
        Ok(labels.into_iter().map(|l| l.unwrap_or(NOISE)).collect())
    }
}

/// Extended DBSCAN interface with noise detection.
pub trait DbscanExt {
    /// Fit and predict, returning labels where noise is marked as `None`.
    fn fit_predict_with_noise(&self, data: &[Vec<f64>]) -> Result<Vec<Option<usize>>>;

    /// Check if a label represents noise.
    fn is_noise(label: usize) -> bool {
        label == NOISE
    }
}

impl DbscanExt for Dbscan {
    fn fit_predict_with_noise(&self, data: &[Vec<f64>]) -> Result<Vec<Option<usize>>> {
        let store = PointStore::load(data.to_vec())?;
        let result = self.fit(&store)?;
        Ok(result
            .row_labels(&store)?
            .into_iter()
            .map(ClusterId::number)
            .collect())
    }
}
