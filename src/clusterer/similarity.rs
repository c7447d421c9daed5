use super::VectorPoint;

/// Similarity measure between two vector points
pub trait Similarity {
    /// Higher means closer
    fn similarity(&self, a: &VectorPoint, b: &VectorPoint) -> f64;

    /// Human-readable name of the metric
    fn description(&self) -> &'static str;

    fn distance(&self, a: &VectorPoint, b: &VectorPoint) -> f64 {
        1.0 - self.similarity(a, b)
    }
}

/// Cosine of the angle between two term vectors
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl Similarity for CosineSimilarity {
    fn similarity(&self, a: &VectorPoint, b: &VectorPoint) -> f64 {
        cosine_similarity(a, b)
    }

    fn description(&self) -> &'static str {
        "Cosine similarity"
    }
}

pub fn cosine_similarity(a: &VectorPoint, b: &VectorPoint) -> f64 {
    let na = a.magnitude();
    let nb = b.magnitude();

    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }

    (a.dot(b) / (na.sqrt() * nb.sqrt())).clamp(-1.0, 1.0)
}

pub fn cosine_distance(a: &VectorPoint, b: &VectorPoint) -> f64 {
    1.0 - cosine_similarity(a, b)
}
