use super::{DocId, Document, ResultSet, Wdf, tokenize};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;

/// A document held entirely in memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryDocument {
    docid: DocId,
    /// Human-readable label (file path, record id)
    name: String,
    /// Original text, kept for presentation
    text: String,
    /// Distinct terms sorted by name
    terms: Vec<(String, Wdf)>,
}

impl MemoryDocument {
    /// Index `text` with the default tokenizer
    pub fn from_text(docid: DocId, name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = tokenize(&text);
        let mut doc = Self::from_terms(docid, name, tokens.into_iter().map(|t| (t, 1)));
        doc.text = text;
        doc
    }

    /// Build from explicit (term, wdf) pairs; repeated terms are summed
    pub fn from_terms<I, S>(docid: DocId, name: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = (S, Wdf)>,
        S: Into<String>,
    {
        let mut counts: BTreeMap<String, Wdf> = BTreeMap::new();
        for (term, wdf) in terms {
            *counts.entry(term.into()).or_insert(0) += wdf;
        }

        Self {
            docid,
            name: name.into(),
            text: String::new(),
            terms: counts.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Within-document frequency of `term`, 0 if absent
    pub fn wdf(&self, term: &str) -> Wdf {
        self.terms
            .binary_search_by(|(t, _)| t.as_str().cmp(term))
            .map(|i| self.terms[i].1)
            .unwrap_or(0)
    }
}

impl Document for MemoryDocument {
    fn docid(&self) -> DocId {
        self.docid
    }

    fn termlist(&self) -> impl Iterator<Item = (&str, Wdf)> + '_ {
        self.terms.iter().map(|(t, wdf)| (t.as_str(), *wdf))
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// Ranked documents, best match first
#[derive(Debug, Clone, Default)]
pub struct MemoryResultSet {
    docs: Vec<MemoryDocument>,
    /// Largest prefetch hint seen so far
    fetched: Cell<usize>,
}

impl MemoryResultSet {
    pub fn new(docs: Vec<MemoryDocument>) -> Self {
        Self {
            docs,
            fetched: Cell::new(0),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryDocument> {
        self.docs.iter()
    }

    /// Largest number of documents a caller asked to prefetch
    pub fn fetched(&self) -> usize {
        self.fetched.get()
    }
}

impl ResultSet for MemoryResultSet {
    type Doc = MemoryDocument;

    fn size(&self) -> usize {
        self.docs.len()
    }

    fn document(&self, rank: usize) -> Option<&MemoryDocument> {
        self.docs.get(rank)
    }

    fn prefetch(&self, count: usize) {
        if count > self.fetched.get() {
            self.fetched.set(count.min(self.docs.len()));
        }
    }
}

impl FromIterator<MemoryDocument> for MemoryResultSet {
    fn from_iter<T: IntoIterator<Item = MemoryDocument>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// In-memory document store with a minimal term-match search
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    docs: Vec<MemoryDocument>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a text and return its docid (docids start at 1)
    pub fn add_text(&mut self, name: impl Into<String>, text: impl Into<String>) -> DocId {
        let docid = self.next_docid();
        self.docs.push(MemoryDocument::from_text(docid, name, text));
        docid
    }

    /// Add a prebuilt document, replacing its docid with the next free one
    pub fn add_document(&mut self, mut doc: MemoryDocument) -> DocId {
        let docid = self.next_docid();
        doc.docid = docid;
        self.docs.push(doc);
        docid
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, docid: DocId) -> Option<&MemoryDocument> {
        let index = (docid as usize).checked_sub(1)?;
        self.docs.get(index)
    }

    /// Every document, in docid order
    pub fn all(&self) -> MemoryResultSet {
        MemoryResultSet::new(self.docs.clone())
    }

    /// Documents containing at least one query term
    ///
    /// Ranked by the summed wdf of the query terms, ties broken by docid.
    pub fn search(&self, query: &str, limit: Option<usize>) -> MemoryResultSet {
        let query_terms = tokenize(query);

        let mut scored: Vec<(Wdf, &MemoryDocument)> = self
            .docs
            .iter()
            .map(|doc| {
                let score = query_terms.iter().map(|t| doc.wdf(t)).sum();
                (score, doc)
            })
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.docid.cmp(&b.1.docid)));

        scored
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|(_, doc)| doc.clone())
            .collect()
    }

    fn next_docid(&self) -> DocId {
        self.docs.len() as DocId + 1
    }
}
