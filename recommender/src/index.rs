use serde::{Deserialize, Serialize};

pub type TermId = u32;

/// Unit-length sparse vector; entries sorted by term id, no explicit zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    pub fn zero() -> Self { Self::default() }

    /// L2-normalize `entries` (which must already be sorted by term id and unique).
    /// An all-zero input yields the zero vector.
    pub(crate) fn normalized(mut entries: Vec<(TermId, f32)>) -> Self {
        entries.retain(|(_, w)| *w != 0.0);
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return Self::zero();
        }
        for (_, w) in entries.iter_mut() { *w /= norm; }
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f32)] { &self.entries }
    pub fn nnz(&self) -> usize { self.entries.len() }
    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn get(&self, term: TermId) -> f32 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Merge-join dot product.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub row: usize,
    pub weight: f32, // normalized tf-idf weight
}

/// One weighted vector per corpus row plus a per-term postings view of the same weights.
#[derive(Debug, Clone, Default)]
pub struct DocumentMatrix {
    rows: Vec<SparseVector>,
    postings: Vec<Vec<Posting>>, // indexed by term id, postings sorted by row
}

impl DocumentMatrix {
    pub fn new(rows: Vec<SparseVector>, dims: usize) -> Self {
        let mut postings: Vec<Vec<Posting>> = vec![Vec::new(); dims];
        for (row, vector) in rows.iter().enumerate() {
            for &(term, weight) in vector.entries() {
                postings[term as usize].push(Posting { row, weight });
            }
        }
        Self { rows, postings }
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn dims(&self) -> usize { self.postings.len() }
    pub fn row(&self, row: usize) -> Option<&SparseVector> { self.rows.get(row) }
    pub fn rows(&self) -> &[SparseVector] { &self.rows }

    pub fn postings(&self, term: TermId) -> &[Posting] {
        self.postings.get(term as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cosine similarity of `query` against every row, in row order.
    pub fn scores(&self, query: &SparseVector) -> Vec<f32> {
        let mut scores = vec![0.0f32; self.rows.len()];
        for &(term, q_w) in query.entries() {
            for p in self.postings(term) {
                scores[p.row] += p.weight * q_w; // cosine since both sides are normalized
            }
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_unit_length() {
        let v = SparseVector::normalized(vec![(0, 3.0), (2, 4.0)]);
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.get(0) - 0.6).abs() < 1e-6);
        assert_eq!(v.get(1), 0.0);
        assert!(SparseVector::normalized(vec![(1, 0.0)]).is_zero());
    }

    #[test]
    fn postings_scores_match_dot_products() {
        let a = SparseVector::normalized(vec![(0, 1.0), (1, 1.0)]);
        let b = SparseVector::normalized(vec![(1, 1.0), (2, 1.0)]);
        let c = SparseVector::normalized(vec![(3, 1.0)]);
        let m = DocumentMatrix::new(vec![a.clone(), b.clone(), c.clone()], 4);
        let scores = m.scores(&a);
        assert!((scores[0] - a.dot(&a)).abs() < 1e-6);
        assert!((scores[1] - a.dot(&b)).abs() < 1e-6);
        assert_eq!(scores[2], 0.0);
        assert_eq!(m.postings(1).iter().map(|p| p.row).collect::<Vec<_>>(), vec![0, 1]);
        assert!(m.scores(&SparseVector::zero()).iter().all(|s| *s == 0.0));
    }
}
