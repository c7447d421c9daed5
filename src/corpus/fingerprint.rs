use super::Document;
use sha2::{Digest, Sha256};
use std::fmt;

/// Content hash of a document's termlist
///
/// Two documents share a fingerprint exactly when they contain the same
/// terms with the same within-document frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of<D: Document>(doc: &D) -> Self {
        let mut terms: Vec<(&str, u32)> = doc.termlist().collect();
        terms.sort_unstable();

        let mut hasher = Sha256::new();
        for (term, wdf) in terms {
            hasher.update(term.as_bytes());
            hasher.update([0u8]);
            hasher.update(wdf.to_le_bytes());
        }

        Self(hasher.finalize().into())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough for logs
        write!(f, "{}", &self.to_hex()[..12])
    }
}
