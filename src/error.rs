//! Error types for palette sampling and image rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that cross the image codec boundary.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of the k-means clusterer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// Zero clusters were requested for a non-empty data set.
    #[error("cannot partition {points} colors into zero clusters")]
    NoClusters { points: usize },

    /// The initial centroid guess does not hold exactly `k` colors.
    #[error("initial centroid guess has {actual} colors, expected {expected}")]
    SeedCountMismatch { expected: usize, actual: usize },

    /// A cluster lost all of its members and no data point was left to re-seed it.
    #[error("only {distinct} distinct colors available for {k} clusters")]
    InsufficientDiversity { k: usize, distinct: usize },

    /// A centroid coordinate stopped being a finite number.
    #[error("centroid {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Failure of the sampling orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("unknown sampling mode")]
    UnknownMode,

    #[error("clustering failed: {0}")]
    Cluster(#[from] ClusterError),
}

/// Crate-level error, used wherever data crosses the codec or file boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {}: {source}", path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("\"{0}\" could not be interpreted as a color")]
    InvalidColor(String),

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error(transparent)]
    Sample(#[from] SampleError),
}

impl Error {
    /// Create an invalid-parameter error from anything printable.
    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}
