use super::FreqSource;
use crate::corpus::{DocId, Document, Wdf};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sparse term vector with a cached squared magnitude
///
/// The magnitude reported by [`VectorPoint::magnitude`] always equals the sum
/// of squared weights. `set_value` keeps the cache current; `add_value` and
/// `divide` mark it stale until [`VectorPoint::recompute_magnitude`] runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorPoint {
    values: HashMap<String, f64>,
    /// Terms in insertion order, with the wdf they were built from
    termlist: Vec<(String, Wdf)>,
    magnitude: f64,
    stale: bool,
}

impl VectorPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to a term's weight, inserting the term if absent
    ///
    /// Leaves the cached magnitude stale.
    pub fn add_value(&mut self, term: &str, delta: f64) {
        match self.values.get_mut(term) {
            Some(value) => *value += delta,
            None => {
                self.termlist.push((term.to_string(), 1));
                self.values.insert(term.to_string(), delta);
            }
        }
        self.stale = true;
    }

    /// Overwrite a term's weight, keeping the magnitude current
    ///
    /// A new term adds its square to the magnitude; replacing a weight
    /// recomputes the sum of squares.
    pub fn set_value(&mut self, term: &str, value: f64) {
        self.insert_term(term, 1, value);
    }

    /// Weight of `term`, exactly 0.0 when absent
    pub fn get_value(&self, term: &str) -> f64 {
        self.values.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.values.contains_key(term)
    }

    /// Divide every weight by `divisor`
    ///
    /// Returns `false` and leaves the weights alone when `divisor` is zero.
    pub fn divide(&mut self, divisor: f64) -> bool {
        if divisor == 0.0 {
            return false;
        }

        for value in self.values.values_mut() {
            *value /= divisor;
        }
        self.stale = true;
        true
    }

    /// Recompute the cached magnitude from scratch
    pub fn recompute_magnitude(&mut self) {
        self.magnitude = self.sum_of_squares();
        self.stale = false;
    }

    /// Squared magnitude (sum of squared weights)
    pub fn magnitude(&self) -> f64 {
        if self.stale {
            self.sum_of_squares()
        } else {
            self.magnitude
        }
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.magnitude().sqrt()
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.termlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.termlist.is_empty()
    }

    /// (term, weight) pairs in insertion order
    pub fn terms(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.termlist
            .iter()
            .map(|(term, _)| (term.as_str(), self.get_value(term)))
    }

    /// (term, wdf) pairs in insertion order
    pub fn termlist(&self) -> impl Iterator<Item = (&str, Wdf)> + '_ {
        self.termlist.iter().map(|(term, wdf)| (term.as_str(), *wdf))
    }

    /// Sparse dot product, walking the shorter vector
    ///
    /// The walk order depends only on the two vectors, never on argument
    /// order, so `a.dot(b)` and `b.dot(a)` are bit-identical. Equal lengths
    /// fall back to address order.
    pub fn dot(&self, other: &VectorPoint) -> f64 {
        let self_first = match self.len().cmp(&other.len()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => (self as *const VectorPoint) <= (other as *const VectorPoint),
        };
        let (short, long) = if self_first {
            (self, other)
        } else {
            (other, self)
        };

        short
            .terms()
            .map(|(term, weight)| weight * long.get_value(term))
            .sum()
    }

    /// The `n` heaviest terms, ties broken alphabetically
    pub fn top_terms(&self, n: usize) -> Vec<(&str, f64)> {
        let mut terms: Vec<(&str, f64)> = self.terms().collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.termlist.clear();
        self.magnitude = 0.0;
        self.stale = false;
    }

    fn insert_term(&mut self, term: &str, wdf: Wdf, value: f64) {
        match self.values.get_mut(term) {
            Some(slot) => {
                *slot = value;
                if !self.stale {
                    self.magnitude = self.sum_of_squares();
                }
            }
            None => {
                self.termlist.push((term.to_string(), wdf));
                self.values.insert(term.to_string(), value);
                if !self.stale {
                    self.magnitude += value * value;
                }
            }
        }
    }

    fn sum_of_squares(&self) -> f64 {
        self.values.values().map(|v| v * v).sum()
    }
}

/// Position of a document point: its rank in the result set and its docid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocHandle {
    pub rank: usize,
    pub docid: DocId,
}

/// TF-IDF vector of one document
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    vector: VectorPoint,
    handle: DocHandle,
}

impl Point {
    /// Weight every distinct term as `(1 + ln wdf) * ln(N / df)`
    ///
    /// A wdf of 0 counts as 1. A term the frequency source has never seen
    /// counts as df = 1, and an empty source as N = 1, so weights stay finite.
    pub fn from_document<F, D>(freqs: &F, rank: usize, doc: &D) -> Self
    where
        F: FreqSource + ?Sized,
        D: Document,
    {
        let doc_count = freqs.doc_count().max(1) as f64;
        let mut vector = VectorPoint::new();

        for (term, wdf) in doc.termlist() {
            if vector.contains(term) {
                continue;
            }

            let wdf = wdf.max(1);
            let tf = 1.0 + f64::from(wdf).ln();
            let df = freqs.term_doc_frequency(term).max(1) as f64;
            let idf = (doc_count / df).ln();

            vector.insert_term(term, wdf, tf * idf);
        }

        Self {
            vector,
            handle: DocHandle {
                rank,
                docid: doc.docid(),
            },
        }
    }

    pub fn vector(&self) -> &VectorPoint {
        &self.vector
    }

    pub fn handle(&self) -> DocHandle {
        self.handle
    }

    pub fn docid(&self) -> DocId {
        self.handle.docid
    }

    pub fn rank(&self) -> usize {
        self.handle.rank
    }
}

impl AsRef<VectorPoint> for Point {
    fn as_ref(&self) -> &VectorPoint {
        &self.vector
    }
}
