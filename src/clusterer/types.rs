use super::{Centroid, ClusterError, Point, compute_centroid, cosine_similarity};
use crate::corpus::{DocId, ResultSet};
use std::fmt;

/// Index of a point in its ClusterSet
pub type PointId = usize;

/// Member points plus one centroid
///
/// Members are indices into the owning [`ClusterSet`]'s point arena. Any
/// membership change invalidates the centroid until it is recalculated.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    members: Vec<PointId>,
    centroid: Centroid,
    centroid_valid: bool,
}

impl Cluster {
    /// Empty cluster with an empty (invalid) centroid
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cluster seeded with `centroid`
    pub fn with_centroid(centroid: Centroid) -> Self {
        Self {
            members: Vec::new(),
            centroid,
            centroid_valid: true,
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[PointId] {
        &self.members
    }

    pub fn centroid(&self) -> &Centroid {
        &self.centroid
    }

    /// Whether the centroid reflects the current members
    pub fn is_centroid_valid(&self) -> bool {
        self.centroid_valid
    }

    pub fn set_centroid(&mut self, centroid: Centroid) {
        self.centroid = centroid;
        self.centroid_valid = true;
    }

    fn add_point(&mut self, id: PointId) {
        self.members.push(id);
        self.centroid_valid = false;
    }

    fn clear(&mut self) {
        self.members.clear();
        self.centroid_valid = false;
    }

    /// Point id of the `index`-th member
    pub fn point(&self, index: usize) -> Result<PointId, ClusterError> {
        self.members
            .get(index)
            .copied()
            .ok_or(ClusterError::OutOfRange {
                index,
                size: self.members.len(),
            })
    }

    /// Mean cosine similarity of the members to the centroid
    ///
    /// `Ok(None)` while the centroid is stale; 0.0 for an empty cluster.
    /// Members missing from `points` are an `UnknownPoint` error.
    pub fn average_distance_to_centroid(
        &self,
        points: &[Point],
    ) -> Result<Option<f64>, ClusterError> {
        if !self.centroid_valid {
            return Ok(None);
        }
        if self.members.is_empty() {
            return Ok(Some(0.0));
        }

        let centroid = self.centroid.vector();
        let mut sum = 0.0;
        for &id in &self.members {
            let point = points.get(id).ok_or(ClusterError::UnknownPoint {
                id,
                count: points.len(),
            })?;
            sum += cosine_similarity(point.vector(), centroid);
        }

        Ok(Some(sum / self.members.len() as f64))
    }

    /// Rebuild the centroid as the mean of the members
    ///
    /// An empty cluster keeps its previous centroid, stays invalid, and
    /// returns `false`.
    fn recalculate(&mut self, points: &[Point]) -> bool {
        let members = self.members.iter().map(|&id| points[id].vector());
        match compute_centroid(members) {
            Some(centroid) => {
                self.centroid = centroid;
                self.centroid_valid = true;
                true
            }
            None => false,
        }
    }
}

/// Ordered clusters over an arena of document points
#[derive(Debug, Clone, Default)]
pub struct ClusterSet {
    points: Vec<Point>,
    clusters: Vec<Cluster>,
    iterations: usize,
    converged: bool,
}

impl ClusterSet {
    /// Cluster set owning `points`, with no clusters yet
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Append a cluster and return its index
    pub fn add_cluster(&mut self, cluster: Cluster) -> usize {
        self.clusters.push(cluster);
        self.clusters.len() - 1
    }

    /// Number of clusters
    pub fn size(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn cluster(&self, index: usize) -> Result<&Cluster, ClusterError> {
        self.clusters.get(index).ok_or(ClusterError::OutOfRange {
            index,
            size: self.clusters.len(),
        })
    }

    pub fn cluster_size(&self, index: usize) -> Result<usize, ClusterError> {
        self.cluster(index).map(Cluster::size)
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    /// Add point `id` to cluster `index`; the centroid is not recomputed
    pub fn add_to_cluster(&mut self, id: PointId, index: usize) -> Result<(), ClusterError> {
        if id >= self.points.len() {
            return Err(ClusterError::UnknownPoint {
                id,
                count: self.points.len(),
            });
        }
        self.cluster_mut(index)?.add_point(id);
        Ok(())
    }

    /// Drop every membership, keeping the clusters and their centroids
    pub fn clear_clusters(&mut self) {
        for cluster in &mut self.clusters {
            cluster.clear();
        }
    }

    /// Recalculate one cluster's centroid; `false` if the cluster is empty
    pub fn recalculate(&mut self, index: usize) -> Result<bool, ClusterError> {
        let size = self.clusters.len();
        let points = &self.points;
        let cluster = self
            .clusters
            .get_mut(index)
            .ok_or(ClusterError::OutOfRange { index, size })?;
        Ok(cluster.recalculate(points))
    }

    /// Recalculate every centroid; returns how many clusters were empty
    pub fn recalculate_centroids(&mut self) -> usize {
        let points = &self.points;
        self.clusters
            .iter_mut()
            .map(|cluster| cluster.recalculate(points))
            .filter(|recalculated| !recalculated)
            .count()
    }

    /// Mean cosine similarity of a cluster's members to its centroid
    ///
    /// Needs a valid centroid. An empty cluster whose centroid was set
    /// explicitly yields 0.0.
    pub fn average_distance_to_centroid(&self, index: usize) -> Result<f64, ClusterError> {
        self.cluster(index)?
            .average_distance_to_centroid(&self.points)?
            .ok_or(ClusterError::StaleCentroid { index })
    }

    /// Cluster index of every point, `None` for unassigned points
    pub fn assignments(&self) -> Vec<Option<usize>> {
        let mut assignments = vec![None; self.points.len()];
        for (index, cluster) in self.clusters.iter().enumerate() {
            for &id in cluster.members() {
                assignments[id] = Some(index);
            }
        }
        assignments
    }

    /// Docids of a cluster's members, in membership order
    pub fn docids(&self, index: usize) -> Result<Vec<DocId>, ClusterError> {
        let cluster = self.cluster(index)?;
        Ok(cluster
            .members()
            .iter()
            .map(|&id| self.points[id].docid())
            .collect())
    }

    /// Resolve a cluster's members against the result set they came from
    pub fn documents<'r, R: ResultSet>(
        &self,
        index: usize,
        results: &'r R,
    ) -> Result<DocumentSet<'r, R::Doc>, ClusterError> {
        let cluster = self.cluster(index)?;
        let docs = cluster
            .members()
            .iter()
            .map(|&id| {
                let rank = self.points[id].rank();
                results
                    .document(rank)
                    .ok_or(ClusterError::MissingDocument { rank })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DocumentSet { docs })
    }

    /// Iterations the clusterer ran
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the clusterer stopped before its iteration limit
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// One-line summary for logs
    pub fn description(&self) -> String {
        let sizes: Vec<usize> = self.clusters.iter().map(Cluster::size).collect();
        format!(
            "ClusterSet(clusters={}, points={}, sizes={:?}, iterations={}, converged={})",
            self.clusters.len(),
            self.points.len(),
            sizes,
            self.iterations,
            self.converged
        )
    }

    pub(crate) fn set_run_stats(&mut self, iterations: usize, converged: bool) {
        self.iterations = iterations;
        self.converged = converged;
    }

    fn cluster_mut(&mut self, index: usize) -> Result<&mut Cluster, ClusterError> {
        let size = self.clusters.len();
        self.clusters
            .get_mut(index)
            .ok_or(ClusterError::OutOfRange { index, size })
    }
}

impl fmt::Display for ClusterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Documents of one cluster, borrowed from the result set
#[derive(Debug)]
pub struct DocumentSet<'a, D> {
    docs: Vec<&'a D>,
}

impl<'a, D> DocumentSet<'a, D> {
    pub fn size(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&'a D, ClusterError> {
        self.docs.get(index).copied().ok_or(ClusterError::OutOfRange {
            index,
            size: self.docs.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a D> + '_ {
        self.docs.iter().copied()
    }
}
