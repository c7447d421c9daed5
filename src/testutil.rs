//! Fixtures shared by unit tests.

use crate::corpus::{DocId, MemoryCorpus, MemoryDocument, MemoryResultSet, Wdf};

pub fn doc(docid: DocId, terms: &[(&str, Wdf)]) -> MemoryDocument {
    MemoryDocument::from_terms(docid, format!("doc{}", docid), terms.iter().copied())
}

/// Nine documents in three topics with disjoint vocabularies
///
/// Ranks cycle through the topics: fruit, space, code, fruit, ...
pub fn three_topic_results() -> MemoryResultSet {
    let topics: [[&str; 3]; 3] = [
        ["apple", "banana", "cherry"],
        ["star", "galaxy", "orbit"],
        ["rust", "compiler", "borrow"],
    ];
    let weights: [[Wdf; 3]; 3] = [[3, 1, 1], [1, 3, 1], [1, 1, 3]];

    let mut docs = Vec::new();
    for (variant, wdfs) in weights.iter().enumerate() {
        for (topic, terms) in topics.iter().enumerate() {
            let docid = (variant * 3 + topic + 1) as DocId;
            let pairs: Vec<(&str, Wdf)> = terms.iter().copied().zip(wdfs.iter().copied()).collect();
            docs.push(doc(docid, &pairs));
        }
    }

    MemoryResultSet::new(docs)
}

/// Topic of a document from `three_topic_results`, by rank
pub fn topic_of_rank(rank: usize) -> usize {
    rank % 3
}

/// The four "cluster" sentences used throughout the tests
pub fn cluster_sentences() -> MemoryCorpus {
    let mut corpus = MemoryCorpus::new();
    corpus.add_text(
        "about",
        "This line is about a cluster. Cluster is important and is everywhere",
    );
    corpus.add_text(
        "search",
        "We need to search for special cluster. Cluster cluster cluster",
    );
    corpus.add_text(
        "computer",
        "Computer cluster is a special example of a cluster. Used to search fast",
    );
    corpus.add_text(
        "star",
        "Another example of cluster is a star cluster. Star cluster has a lot of stars",
    );
    corpus
}
