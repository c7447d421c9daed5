use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Cluster index {index} out of range (cluster count: {size})")]
    OutOfRange { index: usize, size: usize },

    #[error("Point {id} does not exist (point count: {count})")]
    UnknownPoint { id: usize, count: usize },

    #[error("Cannot form {requested} clusters from {available} distinct documents")]
    InvalidClusterCount { requested: usize, available: usize },

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        name: &'static str,
        message: &'static str,
    },

    #[error("Centroid of cluster {index} is stale; recalculate it first")]
    StaleCentroid { index: usize },

    #[error("Document at rank {rank} is not present in the result set")]
    MissingDocument { rank: usize },
}
