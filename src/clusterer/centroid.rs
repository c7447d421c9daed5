use super::{Point, VectorPoint};

/// Mean of a cluster's member points; not backed by any document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Centroid {
    vector: VectorPoint,
}

impl Centroid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Centroid sitting exactly on `point`
    pub fn from_point(point: &Point) -> Self {
        let mut centroid = Self::new();
        centroid.set_to_point(point);
        centroid
    }

    /// Copy the point's weights (no TF-IDF re-weighting)
    pub fn set_to_point(&mut self, point: &Point) {
        self.vector.clear();
        for (term, weight) in point.vector().terms() {
            self.vector.add_value(term, weight);
        }
        self.vector.recompute_magnitude();
    }

    pub fn vector(&self) -> &VectorPoint {
        &self.vector
    }

    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    pub fn clear(&mut self) {
        self.vector.clear();
    }
}

impl AsRef<VectorPoint> for Centroid {
    fn as_ref(&self) -> &VectorPoint {
        &self.vector
    }
}

/// Mean of `members`, or `None` when there are none
pub fn compute_centroid<'a, I>(members: I) -> Option<Centroid>
where
    I: IntoIterator<Item = &'a VectorPoint>,
{
    let mut sum = VectorPoint::new();
    let mut n = 0usize;

    for member in members {
        for (term, weight) in member.terms() {
            sum.add_value(term, weight);
        }
        n += 1;
    }

    if !sum.divide(n as f64) {
        return None;
    }
    sum.recompute_magnitude();

    Some(Centroid { vector: sum })
}
