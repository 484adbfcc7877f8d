use thiserror::Error;

/// Errors returned by the point store and the clustering engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input sequence is empty.
    #[error("empty input")]
    EmptyInput,

    /// Points carry no coordinates at all.
    #[error("points must have at least one coordinate")]
    ZeroDimension,

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch at row {row}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Offending input row.
        row: usize,
        /// Expected dimensionality (taken from the first row).
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at row {row}, column {column}")]
    NonFinite {
        /// Offending input row.
        row: usize,
        /// Offending coordinate index.
        column: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested clustering dimension exceeds the point arity.
    #[error("cluster dimension {requested} exceeds point arity {arity}")]
    ClusterDimTooLarge {
        /// Requested number of leading coordinates.
        requested: usize,
        /// Arity of the points involved.
        arity: usize,
    },

    /// Point id does not belong to the store.
    #[error("unknown point id {0}")]
    UnknownPoint(usize),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid parameters (eps, min_points, cluster_dim, lookups).
    Config,
    /// Empty or inconsistent dataset, detected at load time.
    Data,
}

impl Error {
    /// Which side of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput
            | Error::ZeroDimension
            | Error::DimensionMismatch { .. }
            | Error::NonFinite { .. } => ErrorKind::Data,
            Error::InvalidParameter { .. }
            | Error::ClusterDimTooLarge { .. }
            | Error::UnknownPoint(_) => ErrorKind::Config,
        }
    }

    /// `true` for invalid-parameter errors.
    pub fn is_config(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// `true` for dataset errors.
    pub fn is_data(&self) -> bool {
        self.kind() == ErrorKind::Data
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_split() {
        assert!(Error::EmptyInput.is_data());
        assert!(Error::NonFinite { row: 0, column: 1 }.is_data());
        assert!(Error::ClusterDimTooLarge {
            requested: 3,
            arity: 2
        }
        .is_config());
        assert_eq!(
            Error::InvalidParameter {
                name: "eps",
                message: "must be positive"
            }
            .kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_messages() {
        let err = Error::DimensionMismatch {
            row: 4,
            expected: 2,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch at row 4: expected 2, found 3"
        );
    }
}
