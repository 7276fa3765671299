use crate::index::{DocumentMatrix, SparseVector};
use serde::Serialize;
use std::cmp::Ordering;

/// Score forced onto an excluded row; strictly below any real cosine similarity.
pub const EXCLUDED_SCORE: f32 = -2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ranked {
    pub row: usize,
    pub score: f32,
}

/// Cosine similarity of two unit-length vectors. The zero vector scores 0 against everything.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    a.dot(b)
}

// Score descending, then row ascending: a total order, so results never depend on sort stability.
fn by_rank(a: &Ranked, b: &Ranked) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.row.cmp(&b.row))
}

/// Top `k` rows of `scores`.
///
/// `exclude` has its score replaced by [`EXCLUDED_SCORE`] before ranking and the
/// result is capped at the number of remaining rows, so it can never be returned.
pub fn rank(scores: &[f32], k: usize, exclude: Option<usize>) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = scores
        .iter()
        .enumerate()
        .map(|(row, &score)| Ranked { row, score })
        .collect();
    let mut available = ranked.len();
    if let Some(r) = exclude.and_then(|row| ranked.get_mut(row)) {
        r.score = EXCLUDED_SCORE;
        available -= 1;
    }
    let k = k.min(available);
    if k == 0 {
        return Vec::new();
    }
    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, by_rank);
        ranked.truncate(k);
    }
    ranked.sort_by(by_rank);
    ranked
}

/// Rank every row of `matrix` against `query`.
pub fn rank_against(matrix: &DocumentMatrix, query: &SparseVector, k: usize, exclude: Option<usize>) -> Vec<Ranked> {
    rank(&matrix.scores(query), k, exclude)
}

/// One ranked list per query, in query order.
pub fn rank_many(matrix: &DocumentMatrix, queries: &[SparseVector], k: usize) -> Vec<Vec<Ranked>> {
    queries.iter().map(|q| rank_against(matrix, q, k, None)).collect()
}
