use super::{
    Centroid, Cluster, ClusterError, ClusterSet, Clusterer, CosineSimilarity, Point, Similarity,
    TermListGroup, cosine_similarity,
};
use crate::corpus::{DocumentSource, Fingerprint, ResultSet};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MAX_ITERS: usize = 100;

pub const DEFAULT_SEED: u64 = 42;

/// Largest centroid movement (cosine distance) still counted as converged
pub const CONVERGENCE_THRESHOLD: f64 = 1e-10;

/// Hard cap applied when `max_iters` is 0
pub const UNBOUNDED_ITERATION_CAP: usize = 10_000;

/// How the initial centroids are picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seeding {
    /// k distinct documents drawn uniformly
    #[default]
    Random,
    /// One random document, then repeatedly the document least similar to
    /// every seed chosen so far
    FarthestFirst,
}

impl FromStr for Seeding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Seeding::Random),
            "farthest-first" => Ok(Seeding::FarthestFirst),
            other => Err(format!(
                "unknown seeding '{}' (expected random or farthest-first)",
                other
            )),
        }
    }
}

impl fmt::Display for Seeding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seeding::Random => f.write_str("random"),
            Seeding::FarthestFirst => f.write_str("farthest-first"),
        }
    }
}

/// K-Means over TF-IDF points with cosine similarity
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    /// 0 runs until convergence, bounded by [`UNBOUNDED_ITERATION_CAP`]
    max_iters: usize,
    seeding: Seeding,
    seed: u64,
    tolerance: f64,
    limit: Option<usize>,
}

impl KMeans {
    pub fn new(k: usize, max_iters: usize) -> Result<Self, ClusterError> {
        if k == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "k",
                message: "number of clusters must be greater than zero",
            });
        }

        Ok(Self {
            k,
            max_iters,
            seeding: Seeding::default(),
            seed: DEFAULT_SEED,
            tolerance: CONVERGENCE_THRESHOLD,
            limit: None,
        })
    }

    pub fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }

    /// Seed for the ChaCha8 generator used during initialization
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Centroid movement below which the run counts as converged
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Only cluster the first `limit` documents of the result set
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    fn iteration_cap(&self) -> usize {
        if self.max_iters == 0 {
            UNBOUNDED_ITERATION_CAP
        } else {
            self.max_iters
        }
    }

    /// Point ids of the first document of every distinct fingerprint
    fn distinct_documents<R: ResultSet>(source: DocumentSource<'_, R>) -> Vec<usize> {
        let mut seen = HashSet::new();
        source
            .enumerate()
            .filter(|(_, (_, doc))| seen.insert(Fingerprint::of(*doc)))
            .map(|(id, _)| id)
            .collect()
    }

    fn initialize_points<R: ResultSet>(source: DocumentSource<'_, R>) -> Vec<Point> {
        let freqs = TermListGroup::build(source.clone());
        source
            .map(|(rank, doc)| Point::from_document(&freqs, rank, doc))
            .collect()
    }

    /// Pick `k` seed points among the distinct candidates
    fn choose_seeds(&self, points: &[Point], candidates: &[usize]) -> Vec<usize> {
        if candidates.len() == self.k {
            return candidates.to_vec();
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        match self.seeding {
            Seeding::Random => {
                let mut seeds: Vec<usize> = candidates
                    .choose_multiple(&mut rng, self.k)
                    .copied()
                    .collect();
                seeds.sort_unstable();
                seeds
            }
            Seeding::FarthestFirst => {
                let mut seeds = vec![candidates[rng.gen_range(0..candidates.len())]];

                while seeds.len() < self.k {
                    let mut best: Option<(usize, f64)> = None;
                    for &candidate in candidates {
                        if seeds.contains(&candidate) {
                            continue;
                        }

                        let closest = seeds
                            .iter()
                            .map(|&s| {
                                cosine_similarity(points[candidate].vector(), points[s].vector())
                            })
                            .fold(f64::NEG_INFINITY, f64::max);

                        // Strict comparison keeps the lowest rank on ties
                        if best.map_or(true, |(_, b)| closest < b) {
                            best = Some((candidate, closest));
                        }
                    }

                    match best {
                        Some((candidate, _)) => seeds.push(candidate),
                        None => break,
                    }
                }

                seeds
            }
        }
    }

    /// Index of the most similar centroid for every point
    ///
    /// Ties go to the lowest cluster index.
    fn assign_points<S: Similarity>(cset: &ClusterSet, similarity: &S) -> Vec<usize> {
        let centroids: Vec<&Centroid> = cset.clusters().map(Cluster::centroid).collect();

        cset.points()
            .iter()
            .map(|point| {
                let mut best = 0;
                let mut best_sim = f64::NEG_INFINITY;
                for (index, centroid) in centroids.iter().enumerate() {
                    let sim = similarity.similarity(point.vector(), centroid.vector());
                    if sim > best_sim {
                        best = index;
                        best_sim = sim;
                    }
                }
                best
            })
            .collect()
    }
}

impl Clusterer for KMeans {
    fn cluster<R: ResultSet>(&self, results: &R) -> Result<ClusterSet, ClusterError> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ClusterError::InvalidParameter {
                name: "tolerance",
                message: "must be a non-negative number",
            });
        }

        let source = match self.limit {
            Some(limit) => DocumentSource::with_limit(results, limit),
            None => DocumentSource::new(results),
        };

        if self.k > source.len() {
            return Err(ClusterError::InvalidClusterCount {
                requested: self.k,
                available: source.len(),
            });
        }

        let candidates = Self::distinct_documents(source.clone());
        if self.k > candidates.len() {
            return Err(ClusterError::InvalidClusterCount {
                requested: self.k,
                available: candidates.len(),
            });
        }

        // 1. Points
        let points = Self::initialize_points(source);
        let seeds = self.choose_seeds(&points, &candidates);
        tracing::debug!(points = points.len(), ?seeds, seeding = %self.seeding, "initialized k-means");

        // 2. Clusters seeded from distinct points
        let mut cset = ClusterSet::new(points);
        for &seed in &seeds {
            let centroid = Centroid::from_point(&cset.points()[seed]);
            cset.add_cluster(Cluster::with_centroid(centroid));
        }

        // 3. Assign / recompute until nothing moves
        let similarity = CosineSimilarity;
        let cap = self.iteration_cap();
        let mut previous: Vec<Option<usize>> = vec![None; cset.points().len()];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < cap {
            iterations += 1;

            cset.clear_clusters();
            let assignments = Self::assign_points(&cset, &similarity);

            let mut moved = 0;
            for (id, &index) in assignments.iter().enumerate() {
                if previous[id] != Some(index) {
                    moved += 1;
                    previous[id] = Some(index);
                }
                cset.add_to_cluster(id, index)?;
            }

            let before: Vec<Centroid> = cset.clusters().map(|c| c.centroid().clone()).collect();
            let empty = cset.recalculate_centroids();
            let shift = cset
                .clusters()
                .zip(&before)
                .map(|(cluster, old)| {
                    similarity.distance(old.vector(), cluster.centroid().vector())
                })
                .fold(0.0, f64::max);

            tracing::debug!(iteration = iterations, moved, empty, shift, "k-means iteration");

            if moved == 0 || shift <= self.tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::warn!(
                iterations,
                cap,
                "k-means stopped at the iteration limit without converging"
            );
        }
        let empty = cset.clusters().filter(|c| c.is_empty()).count();
        if empty > 0 {
            tracing::warn!(empty, "k-means finished with empty clusters");
        }
        cset.set_run_stats(iterations, converged);

        tracing::info!(clusterer = %self.description(), result = %cset, "clustering finished");
        Ok(cset)
    }

    fn description(&self) -> String {
        format!(
            "KMeans(k={}, max_iters={}, seeding={}, seed={})",
            self.k, self.max_iters, self.seeding, self.seed
        )
    }
}
