// Public API exports
pub mod clusterer;
pub mod config;
pub mod corpus;
pub mod report;

#[cfg(test)]
mod testutil;

// Re-export main types for convenience
pub use corpus::{
    CorpusError, DocId, Document, DocumentSource, Fingerprint, MemoryCorpus, MemoryDocument,
    MemoryResultSet, ResultSet, Wdf, load_path, tokenize,
};

pub use clusterer::{
    Algorithm, Centroid, Cluster, ClusterError, ClusterSet, Clusterer, CosineSimilarity,
    DocumentSet, DummyFreqSource, FreqSource, KMeans, Point, RoundRobin, Seeding, Similarity,
    TermListGroup, VectorPoint,
};

pub use config::{AlgorithmKind, ClusterConfig};
pub use report::ClusterReport;
