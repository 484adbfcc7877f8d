//! Density-based spatial clustering.
//!
//! `densecan` groups points that are densely packed into clusters and labels
//! isolated points as noise (DBSCAN).
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`PointStore`]: an immutable dataset with eps-radius neighborhood queries
//! - [`Dbscan`]: the cluster-expansion engine
//! - [`cluster::sweep`]: parallel runs of several configurations over one store

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    Cluster, ClusterId, ClusteringResult, Clustering, Dbscan, DbscanExt, DbscanParams, PointId,
    PointStore, NOISE,
};
pub use error::{Error, ErrorKind, Result};
