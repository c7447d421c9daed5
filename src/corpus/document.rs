/// Identifier of a document in the underlying store
pub type DocId = u32;

/// Within-document frequency of a term
pub type Wdf = u32;

/// A document as seen by the clusterer: an id and its term statistics
pub trait Document {
    /// Store-assigned identifier
    fn docid(&self) -> DocId;

    /// Distinct terms of the document with their within-document frequency
    ///
    /// Order need not be stable across calls, but must not change during a
    /// single clustering run.
    fn termlist(&self) -> impl Iterator<Item = (&str, Wdf)> + '_;

    /// Label used when presenting the document
    fn label(&self) -> String {
        format!("#{}", self.docid())
    }
}

/// A ranked set of documents returned by a search
pub trait ResultSet {
    type Doc: Document;

    /// Number of documents in the result set
    fn size(&self) -> usize;

    /// Fetch the document at `rank` (0 is the best match)
    fn document(&self, rank: usize) -> Option<&Self::Doc>;

    /// Hint that the first `count` documents are about to be read
    fn prefetch(&self, _count: usize) {}
}

/// Sequential walk over the first `maxitems` documents of a result set
pub struct DocumentSource<'a, R: ResultSet> {
    results: &'a R,
    maxitems: usize,
    index: usize,
}

impl<'a, R: ResultSet> DocumentSource<'a, R> {
    /// Walk every document in the result set
    pub fn new(results: &'a R) -> Self {
        Self::with_limit(results, results.size())
    }

    /// Walk at most `maxitems` documents, prefetching them up front
    pub fn with_limit(results: &'a R, maxitems: usize) -> Self {
        let maxitems = maxitems.min(results.size());
        if maxitems > 0 {
            results.prefetch(maxitems);
        }

        Self {
            results,
            maxitems,
            index: 0,
        }
    }

    /// Number of documents this source will yield
    pub fn len(&self) -> usize {
        self.maxitems
    }

    pub fn is_empty(&self) -> bool {
        self.maxitems == 0
    }

    /// Whether every document has been yielded
    pub fn at_end(&self) -> bool {
        self.index >= self.maxitems
    }

    /// Restart the walk from the top-ranked document
    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

impl<'a, R: ResultSet> Clone for DocumentSource<'a, R> {
    fn clone(&self) -> Self {
        Self {
            results: self.results,
            maxitems: self.maxitems,
            index: self.index,
        }
    }
}

impl<'a, R: ResultSet> Iterator for DocumentSource<'a, R> {
    /// Rank in the result set and the document itself
    type Item = (usize, &'a R::Doc);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.maxitems {
            let rank = self.index;
            self.index += 1;

            match self.results.document(rank) {
                Some(doc) => return Some((rank, doc)),
                None => tracing::warn!(rank, "result set has a hole, skipping rank"),
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.maxitems.saturating_sub(self.index)))
    }
}
