use crate::clusterer::{ClusterError, ClusterSet};
use crate::corpus::{DocId, Document, ResultSet};
use chrono::Utc;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct ClusterReport {
    pub generator: String,
    pub created_at: String,
    pub clusterer: String,
    pub documents: usize,
    pub iterations: usize,
    pub converged: bool,
    pub clusters: Vec<ClusterSummary>,
}

#[derive(Debug, Serialize)]
pub struct ClusterSummary {
    pub index: usize,
    pub size: usize,
    pub docids: Vec<DocId>,
    pub labels: Vec<String>,
    /// Mean cosine similarity to the centroid; absent when the centroid is stale
    pub average_similarity: Option<f64>,
    pub top_terms: Vec<TermWeight>,
}

#[derive(Debug, Serialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

impl ClusterReport {
    /// Summarize a finished clustering run
    pub fn build<R: ResultSet>(
        clusterer: &str,
        cset: &ClusterSet,
        results: &R,
        top_terms: usize,
    ) -> Result<Self, ClusterError> {
        let mut clusters = Vec::with_capacity(cset.size());

        for index in 0..cset.size() {
            let cluster = cset.cluster(index)?;
            let labels = cset
                .documents(index, results)?
                .iter()
                .map(Document::label)
                .collect();

            clusters.push(ClusterSummary {
                index,
                size: cluster.size(),
                docids: cset.docids(index)?,
                labels,
                average_similarity: cset.average_distance_to_centroid(index).ok(),
                top_terms: cluster
                    .centroid()
                    .vector()
                    .top_terms(top_terms)
                    .into_iter()
                    .map(|(term, weight)| TermWeight {
                        term: term.to_string(),
                        weight,
                    })
                    .collect(),
            });
        }

        Ok(Self {
            generator: format!("docluster v{}", env!("CARGO_PKG_VERSION")),
            created_at: Utc::now().to_rfc3339(),
            clusterer: clusterer.to_string(),
            documents: cset.points().len(),
            iterations: cset.iterations(),
            converged: cset.converged(),
            clusters,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Plain-text rendering for terminals
impl fmt::Display for ClusterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} over {} documents: {} iteration(s), {}",
            self.clusterer,
            self.documents,
            self.iterations,
            if self.converged {
                "converged"
            } else {
                "not converged"
            }
        )?;

        for cluster in &self.clusters {
            write!(f, "\nCluster {} ({} docs)", cluster.index, cluster.size)?;
            if let Some(sim) = cluster.average_similarity {
                write!(f, ", avg similarity {:.3}", sim)?;
            }
            writeln!(f)?;

            if !cluster.top_terms.is_empty() {
                let terms: Vec<&str> = cluster.top_terms.iter().map(|t| t.term.as_str()).collect();
                writeln!(f, "  terms: {}", terms.join(", "))?;
            }
            for label in &cluster.labels {
                writeln!(f, "  - {}", label)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusterer::{Clusterer, KMeans, RoundRobin, Seeding};
    use crate::testutil::three_topic_results;

    #[test]
    fn test_report_lists_every_cluster() {
        let results = three_topic_results();
        let km = KMeans::new(3, 20).unwrap().with_seeding(Seeding::FarthestFirst);
        let cset = km.cluster(&results).unwrap();

        let report = ClusterReport::build(&km.description(), &cset, &results, 3).unwrap();
        assert_eq!(report.documents, 9);
        assert_eq!(report.clusters.len(), 3);
        assert!(report.converged);

        for cluster in &report.clusters {
            assert_eq!(cluster.size, 3);
            assert_eq!(cluster.labels.len(), 3);
            assert_eq!(cluster.top_terms.len(), 3);
            assert!(cluster.average_similarity.unwrap() > 0.5);
        }
    }

    #[test]
    fn test_report_json_and_text() {
        let results = three_topic_results();
        let rr = RoundRobin::new(2).unwrap();
        let cset = rr.cluster(&results).unwrap();
        let report = ClusterReport::build(&rr.description(), &cset, &results, 2).unwrap();

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["clusterer"], "RoundRobin(k=2)");
        assert_eq!(json["clusters"][0]["docids"], serde_json::json!([1, 3, 5, 7, 9]));

        let text = report.to_string();
        assert!(text.starts_with("RoundRobin(k=2) over 9 documents"));
        assert!(text.contains("Cluster 1 (4 docs)"));
        assert!(text.contains("  - doc2"));
    }
}
