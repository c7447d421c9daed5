/// Common English words that carry no topical signal
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "of", "to", "and", "or", "for", "with", "this",
    "that", "be", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "can", "not", "no", "but", "if",
    "at", "by", "from", "as", "into", "about", "so", "its", "we", "our", "they", "them", "their",
];

/// Minimum term length in characters
pub const MIN_TERM_LEN: usize = 2;

/// Split text into lowercase alphanumeric terms, dropping stop words
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TERM_LEN)
        .map(|w| w.to_lowercase())
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let terms = tokenize("Star cluster, STAR-cluster!");
        assert_eq!(terms, vec!["star", "cluster", "star", "cluster"]);
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_terms() {
        let terms = tokenize("This is a cluster of x y stars");
        assert_eq!(terms, vec!["cluster", "stars"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,,, ").is_empty());
    }
}
