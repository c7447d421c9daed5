mod centroid;
mod error;
mod freq;
mod kmeans;
mod point;
mod round_robin;
mod similarity;
mod types;


pub use centroid::{Centroid, compute_centroid};
pub use error::ClusterError;
pub use freq::{DummyFreqSource, FreqSource, TermListGroup};
pub use kmeans::{
    CONVERGENCE_THRESHOLD, DEFAULT_MAX_ITERS, DEFAULT_SEED, KMeans, Seeding,
    UNBOUNDED_ITERATION_CAP,
};
pub use point::{DocHandle, Point, VectorPoint};
pub use round_robin::RoundRobin;
pub use similarity::{CosineSimilarity, Similarity, cosine_distance, cosine_similarity};
pub use types::{Cluster, ClusterSet, DocumentSet, PointId};

use crate::corpus::ResultSet;

/// Core trait that all clustering algorithms implement
pub trait Clusterer {
    /// Group the documents of `results` into clusters
    ///
    /// # Arguments
    /// * `results` - Ranked result set; documents are read in rank order
    ///
    /// # Returns
    /// The populated cluster set, or a configuration error raised before any
    /// work is done
    fn cluster<R: ResultSet>(&self, results: &R) -> Result<ClusterSet, ClusterError>;

    /// Short description for logs
    fn description(&self) -> String;
}

/// Runtime choice of clusterer
#[derive(Debug, Clone)]
pub enum Algorithm {
    RoundRobin(RoundRobin),
    KMeans(KMeans),
}

impl Clusterer for Algorithm {
    fn cluster<R: ResultSet>(&self, results: &R) -> Result<ClusterSet, ClusterError> {
        match self {
            Algorithm::RoundRobin(rr) => rr.cluster(results),
            Algorithm::KMeans(km) => km.cluster(results),
        }
    }

    fn description(&self) -> String {
        match self {
            Algorithm::RoundRobin(rr) => rr.description(),
            Algorithm::KMeans(km) => km.description(),
        }
    }
}

impl From<RoundRobin> for Algorithm {
    fn from(rr: RoundRobin) -> Self {
        Algorithm::RoundRobin(rr)
    }
}

impl From<KMeans> for Algorithm {
    fn from(km: KMeans) -> Self {
        Algorithm::KMeans(km)
    }
}
