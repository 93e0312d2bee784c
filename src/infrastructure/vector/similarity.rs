//! Brute-force cosine similarity ranking
//!
//! Linear in the number of vectors per query. Good enough for a single
//! document with a few thousand chunks; an ANN index would sit behind the
//! same `rank_top_k` contract.

use std::cmp::Ordering;

/// Cosine similarity between two vectors.
///
/// Returns a value in [-1, 1]. A zero-norm vector, or one whose components
/// overflow the computation, scores 0 instead of producing NaN.
#[allow(clippy::cast_possible_truncation)]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return 0.0;
    }

    similarity.clamp(-1.0, 1.0) as f32
}

/// Score every vector against `query` and return the best `top_k`
///
/// Results are `(index, score)` pairs, highest score first. The sort is
/// stable, so equal scores keep ascending index order and repeated calls
/// return identical output.
pub fn rank_top_k(query: &[f32], vectors: &[Vec<f32>], top_k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| (index, cosine_similarity(query, vector)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_k);
    scored
}
