use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON corpus: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to walk corpus directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Corpus is empty: {0}")]
    Empty(String),
}
