use super::{Cluster, ClusterError, ClusterSet, Clusterer, Point, TermListGroup};
use crate::corpus::{DocumentSource, ResultSet};

/// Baseline clusterer: the i-th document goes to cluster `i mod k`
#[derive(Debug, Clone)]
pub struct RoundRobin {
    num_clusters: usize,
    limit: Option<usize>,
}

impl RoundRobin {
    pub fn new(num_clusters: usize) -> Result<Self, ClusterError> {
        if num_clusters == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "num_clusters",
                message: "must be greater than zero",
            });
        }

        Ok(Self {
            num_clusters,
            limit: None,
        })
    }

    /// Only cluster the first `limit` documents of the result set
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }
}

impl Clusterer for RoundRobin {
    fn cluster<R: ResultSet>(&self, results: &R) -> Result<ClusterSet, ClusterError> {
        let source = match self.limit {
            Some(limit) => DocumentSource::with_limit(results, limit),
            None => DocumentSource::new(results),
        };

        let freqs = TermListGroup::build(source.clone());
        let points: Vec<Point> = source
            .map(|(rank, doc)| Point::from_document(&freqs, rank, doc))
            .collect();

        let mut cset = ClusterSet::new(points);
        for _ in 0..self.num_clusters {
            cset.add_cluster(Cluster::new());
        }

        for id in 0..cset.points().len() {
            cset.add_to_cluster(id, id % self.num_clusters)?;
        }

        let empty = cset.recalculate_centroids();
        if empty > 0 {
            tracing::warn!(empty, "round robin left clusters empty");
        }
        cset.set_run_stats(1, true);

        tracing::info!(clusterer = %self.description(), result = %cset, "clustering finished");
        Ok(cset)
    }

    fn description(&self) -> String {
        format!("RoundRobin(k={})", self.num_clusters)
    }
}
