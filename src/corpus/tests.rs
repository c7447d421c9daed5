use super::*;
use std::fs;

fn sample_corpus() -> MemoryCorpus {
    let mut corpus = MemoryCorpus::new();
    corpus.add_text("a", "This line is about a cluster. Cluster is important and is everywhere");
    corpus.add_text("b", "We need to search for special cluster. Cluster cluster cluster");
    corpus.add_text("c", "Computer cluster is a special example of a cluster. Used to search fast");
    corpus.add_text("d", "Another example of cluster is a star cluster. Star cluster has a lot of stars");
    corpus.add_text("e", "Nothing relevant here at all");
    corpus
}

#[test]
fn test_docids_start_at_one() {
    let corpus = sample_corpus();
    assert_eq!(corpus.len(), 5);
    assert_eq!(corpus.get(1).unwrap().name(), "a");
    assert_eq!(corpus.get(5).unwrap().name(), "e");
    assert!(corpus.get(0).is_none());
    assert!(corpus.get(6).is_none());
}

#[test]
fn test_from_text_counts_wdf() {
    let corpus = sample_corpus();
    let doc = corpus.get(2).unwrap();
    assert_eq!(doc.wdf("cluster"), 4);
    assert_eq!(doc.wdf("search"), 1);
    assert_eq!(doc.wdf("missing"), 0);
}

#[test]
fn test_from_terms_merges_duplicates() {
    let doc = MemoryDocument::from_terms(7, "x", vec![("b", 2), ("a", 1), ("b", 3)]);
    let terms: Vec<(&str, Wdf)> = doc.termlist().collect();
    assert_eq!(terms, vec![("a", 1), ("b", 5)]);
    assert_eq!(doc.docid(), 7);
}

#[test]
fn test_search_ranks_by_query_wdf() {
    let corpus = sample_corpus();
    let results = corpus.search("cluster", None);

    assert_eq!(results.size(), 4);
    // "a" and "c" both mention cluster twice; docid breaks the tie
    let names: Vec<&str> = results.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["b", "d", "a", "c"]);
}

#[test]
fn test_search_limit() {
    let corpus = sample_corpus();
    let results = corpus.search("cluster", Some(2));
    assert_eq!(results.size(), 2);
}

#[test]
fn test_search_no_match() {
    let corpus = sample_corpus();
    assert_eq!(corpus.search("galaxy", None).size(), 0);
}

#[test]
fn test_document_source_walks_in_rank_order() {
    let results = sample_corpus().all();
    let ranks: Vec<usize> = DocumentSource::new(&results).map(|(rank, _)| rank).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_document_source_limit_prefetches() {
    let results = sample_corpus().all();
    let mut source = DocumentSource::with_limit(&results, 3);

    assert_eq!(source.len(), 3);
    assert_eq!(results.fetched(), 3);

    assert_eq!(source.by_ref().count(), 3);
    assert!(source.at_end());

    source.rewind();
    assert!(!source.at_end());
}

#[test]
fn test_document_source_limit_clamped() {
    let results = sample_corpus().all();
    let source = DocumentSource::with_limit(&results, 50);
    assert_eq!(source.len(), 5);
    assert_eq!(results.fetched(), 5);
}

#[test]
fn test_empty_source_does_not_prefetch() {
    let results = MemoryResultSet::default();
    let source = DocumentSource::new(&results);
    assert!(source.is_empty());
    assert_eq!(results.fetched(), 0);
}

#[test]
fn test_fingerprint_ignores_docid_and_order() {
    let a = MemoryDocument::from_terms(1, "a", vec![("x", 1), ("y", 2)]);
    let b = MemoryDocument::from_terms(2, "b", vec![("y", 2), ("x", 1)]);
    let c = MemoryDocument::from_terms(3, "c", vec![("y", 3), ("x", 1)]);

    assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
    assert_ne!(Fingerprint::of(&a), Fingerprint::of(&c));
    assert_eq!(Fingerprint::of(&a).to_hex().len(), 64);
}

#[test]
fn test_parse_json_strings_and_records() {
    let corpus = parse_json(r#"["star cluster", {"id": "pc", "text": "computer cluster"}, {"text": "galaxy"}]"#)
        .unwrap();

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.get(1).unwrap().name(), "doc1");
    assert_eq!(corpus.get(2).unwrap().name(), "pc");
    assert_eq!(corpus.get(3).unwrap().name(), "doc3");
}

#[test]
fn test_parse_json_rejects_garbage() {
    let result = parse_json("{not json");
    assert!(matches!(result, Err(CorpusError::Json(_))));
}

#[test]
fn test_load_dir_reads_text_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "star cluster").unwrap();
    fs::write(dir.path().join("a.md"), "computer cluster").unwrap();
    fs::write(dir.path().join("skip.bin"), [0xFFu8, 0xFE]).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("c.txt"), "galaxy").unwrap();

    let corpus = load_path(dir.path()).unwrap();
    let names: Vec<&str> = (1..=corpus.len() as DocId)
        .map(|id| corpus.get(id).unwrap().name())
        .collect();

    assert_eq!(names, vec!["a.md", "b.txt", "nested/c.txt"]);
}

#[test]
fn test_load_dir_empty_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_dir(dir.path());
    assert!(matches!(result, Err(CorpusError::Empty(_))));
}
