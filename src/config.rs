use crate::clusterer::{
    Algorithm, CONVERGENCE_THRESHOLD, ClusterError, DEFAULT_MAX_ITERS, DEFAULT_SEED, KMeans,
    RoundRobin, Seeding,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of clusters
pub const DEFAULT_CLUSTERS: usize = 3;

/// Which clusterer to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    #[default]
    Kmeans,
    RoundRobin,
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kmeans" | "k-means" => Ok(AlgorithmKind::Kmeans),
            "round-robin" => Ok(AlgorithmKind::RoundRobin),
            other => Err(format!(
                "unknown algorithm '{}' (expected kmeans or round-robin)",
                other
            )),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Kmeans => f.write_str("kmeans"),
            AlgorithmKind::RoundRobin => f.write_str("round-robin"),
        }
    }
}

/// Clustering parameters, loadable from JSON
///
/// Missing fields take their defaults, unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfig {
    pub algorithm: AlgorithmKind,
    pub clusters: usize,
    /// 0 means run until convergence
    pub max_iters: usize,
    pub seeding: Seeding,
    pub seed: u64,
    pub tolerance: f64,
    /// Only cluster the first `limit` ranked documents
    pub limit: Option<usize>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::default(),
            clusters: DEFAULT_CLUSTERS,
            max_iters: DEFAULT_MAX_ITERS,
            seeding: Seeding::default(),
            seed: DEFAULT_SEED,
            tolerance: CONVERGENCE_THRESHOLD,
            limit: None,
        }
    }
}

impl ClusterConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Construct the configured clusterer
    pub fn build(&self) -> Result<Algorithm, ClusterError> {
        let algorithm = match self.algorithm {
            AlgorithmKind::RoundRobin => {
                let mut rr = RoundRobin::new(self.clusters)?;
                if let Some(limit) = self.limit {
                    rr = rr.with_limit(limit);
                }
                Algorithm::RoundRobin(rr)
            }
            AlgorithmKind::Kmeans => {
                let mut km = KMeans::new(self.clusters, self.max_iters)?
                    .with_seeding(self.seeding)
                    .with_seed(self.seed)
                    .with_tolerance(self.tolerance);
                if let Some(limit) = self.limit {
                    km = km.with_limit(limit);
                }
                Algorithm::KMeans(km)
            }
        };

        Ok(algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusterer::Clusterer;

    #[test]
    fn test_defaults() {
        let config = ClusterConfig::default();
        assert_eq!(config.algorithm, AlgorithmKind::Kmeans);
        assert_eq!(config.clusters, 3);
        assert_eq!(config.max_iters, 100);
        assert_eq!(config.seed, 42);
        assert!(config.limit.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ClusterConfig::from_json(r#"{"clusters": 5, "seeding": "farthest-first"}"#).unwrap();
        assert_eq!(config.clusters, 5);
        assert_eq!(config.seeding, Seeding::FarthestFirst);
        assert_eq!(config.max_iters, DEFAULT_MAX_ITERS);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ClusterConfig::from_json(r#"{"clusterz": 5}"#).is_err());
    }

    #[test]
    fn test_build_round_robin() {
        let config = ClusterConfig {
            algorithm: AlgorithmKind::RoundRobin,
            clusters: 4,
            ..ClusterConfig::default()
        };
        let algorithm = config.build().unwrap();
        assert_eq!(algorithm.description(), "RoundRobin(k=4)");
    }

    #[test]
    fn test_build_zero_clusters_fails() {
        let config = ClusterConfig {
            clusters: 0,
            ..ClusterConfig::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!("round-robin".parse(), Ok(AlgorithmKind::RoundRobin));
        assert_eq!("k-means".parse(), Ok(AlgorithmKind::Kmeans));
        assert!("spectral".parse::<AlgorithmKind>().is_err());
        assert_eq!("farthest-first".parse(), Ok(Seeding::FarthestFirst));
        assert!("plusplus".parse::<Seeding>().is_err());
    }
}
