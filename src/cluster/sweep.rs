//! Independent runs over a shared point store.
//!
//! A [`PointStore`] is read-only after loading, so several configurations can
//! be clustered at once. Each run owns its traversal state.

use rayon::prelude::*;
use tracing::debug;

use super::dbscan::Dbscan;
use super::result::ClusteringResult;
use super::store::PointStore;
use crate::error::Result;

/// Run every configuration against `store` in parallel.
///
/// Results are returned in the order of `configs`; a failing configuration
/// does not affect the others.
pub fn fit_all(store: &PointStore, configs: &[Dbscan]) -> Vec<Result<ClusteringResult>> {
    debug!(runs = configs.len(), points = store.len(), "dbscan: parameter sweep");
    configs.par_iter().map(|dbscan| dbscan.fit(store)).collect()
}
