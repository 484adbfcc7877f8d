use crate::error::Result;

/// Common interface for hard clustering over raw coordinate rows.
pub trait Clustering {
    /// Fit the model and return one cluster label per input row.
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>>;
}
