use super::{CorpusError, MemoryCorpus};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// File extensions picked up when loading a directory
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "text", "rst"];

/// One entry of a JSON corpus file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonEntry {
    Text(String),
    Record {
        #[serde(default)]
        id: Option<String>,
        text: String,
    },
}

/// Load a corpus from a directory of text files or a JSON file
pub fn load_path(path: &Path) -> Result<MemoryCorpus, CorpusError> {
    if path.is_dir() {
        load_dir(path)
    } else {
        load_json(path)
    }
}

/// Index every text file under `dir`, in path order
pub fn load_dir(dir: &Path) -> Result<MemoryCorpus, CorpusError> {
    let mut corpus = MemoryCorpus::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_text = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| TEXT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if !is_text {
            continue;
        }

        let bytes = fs::read(entry.path())?;
        let Ok(text) = String::from_utf8(bytes) else {
            tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 file");
            continue;
        };

        let name = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        corpus.add_text(name, text);
    }

    if corpus.is_empty() {
        return Err(CorpusError::Empty(format!(
            "no text files found under {}",
            dir.display()
        )));
    }

    tracing::debug!(documents = corpus.len(), dir = %dir.display(), "loaded corpus directory");
    Ok(corpus)
}

/// Parse a JSON array of strings or `{ "id": ..., "text": ... }` records
pub fn load_json(path: &Path) -> Result<MemoryCorpus, CorpusError> {
    let raw = fs::read_to_string(path)?;
    let corpus = parse_json(&raw)?;

    if corpus.is_empty() {
        return Err(CorpusError::Empty(format!(
            "no documents in {}",
            path.display()
        )));
    }

    Ok(corpus)
}

/// Parse JSON corpus text
pub fn parse_json(raw: &str) -> Result<MemoryCorpus, CorpusError> {
    let entries: Vec<JsonEntry> = serde_json::from_str(raw)?;
    let mut corpus = MemoryCorpus::new();

    for (i, entry) in entries.into_iter().enumerate() {
        let (name, text) = match entry {
            JsonEntry::Text(text) => (format!("doc{}", i + 1), text),
            JsonEntry::Record { id, text } => {
                (id.unwrap_or_else(|| format!("doc{}", i + 1)), text)
            }
        };
        corpus.add_text(name, text);
    }

    Ok(corpus)
}
