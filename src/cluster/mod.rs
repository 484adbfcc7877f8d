//! Density-based clustering of points in d-dimensional space.
//!
//! Two pieces, composed linearly:
//!
//! - [`PointStore`] holds the dataset and answers eps-radius neighborhood
//!   queries by brute-force distance over the leading `cluster_dim`
//!   coordinates.
//! - [`Dbscan`] drives those queries and produces a [`ClusteringResult`]:
//!   numbered clusters in creation order plus a noise set.
//!
//! Every point of the store ends up in exactly one cluster or in noise. The
//! run is deterministic for a fixed input order.
//!
//! ## Usage
//!
//! ```rust
//! use densecan::cluster::{ClusterId, Dbscan, PointStore};
//!
//! let store = PointStore::load(vec![
//!     vec![0.0, 0.0],
//!     vec![1.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![1.0, 1.0],
//!     vec![100.0, 100.0],
//! ])
//! .unwrap();
//!
//! let result = Dbscan::new(1.5, 2).with_cluster_dim(2).fit(&store).unwrap();
//! assert_eq!(result.n_clusters(), 1);
//! assert_eq!(result.cluster(ClusterId::Numbered(0)).unwrap().len(), 4);
//! assert_eq!(result.noise().unwrap().len(), 1);
//! ```
//!
//! Slice-based callers can skip the store:
//!
//! ```rust
//! use densecan::cluster::{Clustering, Dbscan, NOISE};
//!
//! let data = vec![vec![0.0, 0.0], vec![0.1, 0.1], vec![10.0, 10.0]];
//! let labels = Dbscan::new(0.5, 1).fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, NOISE]);
//! ```

mod dbscan;
mod result;
mod store;
pub mod sweep;
mod traits;
mod util;

pub use dbscan::{Dbscan, DbscanExt, DbscanParams, NOISE};
pub use result::{Cluster, ClusterId, ClusteringResult};
pub use store::{PointId, PointStore};
pub use traits::Clustering;
