use crate::corpus::{Document, DocumentSource, ResultSet};
use std::collections::{HashMap, HashSet};

/// Corpus statistics used for IDF weighting
pub trait FreqSource {
    /// Number of documents containing `term`, 0 if never seen
    fn term_doc_frequency(&self, term: &str) -> usize;

    /// Number of documents the statistics were gathered from
    fn doc_count(&self) -> usize;
}

/// Frequency source that reports 1 for everything
///
/// With both counts at 1 every IDF factor is `ln(1) = 0`, so points built
/// against it carry zero weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyFreqSource;

impl FreqSource for DummyFreqSource {
    fn term_doc_frequency(&self, _term: &str) -> usize {
        1
    }

    fn doc_count(&self) -> usize {
        1
    }
}

/// Document frequencies gathered from one pass over a result set
#[derive(Debug, Clone, Default)]
pub struct TermListGroup {
    termfreq: HashMap<String, usize>,
    doc_count: usize,
}

impl TermListGroup {
    /// Scan every document of `source` once
    pub fn build<R: ResultSet>(source: DocumentSource<'_, R>) -> Self {
        let mut group = Self::default();
        for (_, doc) in source {
            group.add_document(doc);
        }

        tracing::debug!(
            documents = group.doc_count,
            vocabulary = group.termfreq.len(),
            "built term list group"
        );
        group
    }

    /// Scan the whole result set
    pub fn from_result_set<R: ResultSet>(results: &R) -> Self {
        Self::build(DocumentSource::new(results))
    }

    /// Number of distinct terms seen
    pub fn vocabulary_size(&self) -> usize {
        self.termfreq.len()
    }

    fn add_document<D: Document>(&mut self, doc: &D) {
        // Each distinct term counts once per document, whatever its wdf
        let mut seen = HashSet::new();
        for (term, _) in doc.termlist() {
            if !seen.insert(term) {
                continue;
            }
            match self.termfreq.get_mut(term) {
                Some(count) => *count += 1,
                None => {
                    self.termfreq.insert(term.to_string(), 1);
                }
            }
        }
        self.doc_count += 1;
    }
}

impl FreqSource for TermListGroup {
    fn term_doc_frequency(&self, term: &str) -> usize {
        self.termfreq.get(term).copied().unwrap_or(0)
    }

    fn doc_count(&self) -> usize {
        self.doc_count
    }
}
