//! Document and result-set providers consumed by the clusterers.
//!
//! The clusterers only see the [`Document`] and [`ResultSet`] traits. The
//! in-memory types here implement both so the crate can cluster plain text
//! without an external search engine.

mod document;
mod error;
mod fingerprint;
mod loader;
mod memory;
mod tokenize;

#[cfg(test)]
mod tests;

pub use document::{DocId, Document, DocumentSource, ResultSet, Wdf};
pub use error::CorpusError;
pub use fingerprint::Fingerprint;
pub use loader::{load_dir, load_json, load_path, parse_json};
pub use memory::{MemoryCorpus, MemoryDocument, MemoryResultSet};
pub use tokenize::{MIN_TERM_LEN, tokenize};
