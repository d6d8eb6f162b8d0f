//! Retrieval quality helpers: exact ground truth and recall@k.

use crate::candidate::{Candidate, ScoredCandidate};
use crate::ranker::score_round;
use ahash::AHashSet;
use funnelx_core::{Error, PointId, Result, Vector};

/// Fraction of `ground_truth` ids present in `retrieved`.
///
/// An empty ground truth counts as fully recalled.
pub fn recall_at_k(retrieved: &[PointId], ground_truth: &[PointId]) -> f64 {
    if ground_truth.is_empty() {
        return 1.0;
    }
    let found: AHashSet<&PointId> = retrieved.iter().collect();
    let hits = ground_truth.iter().filter(|id| found.contains(id)).count();
    hits as f64 / ground_truth.len() as f64
}

/// Brute-force top `k` by full-length cosine similarity.
///
/// Scores are computed exactly as a funnel round over the whole query
/// length would compute them, so the two are directly comparable.
pub fn exact_ranking(candidates: &[Candidate], query: &Vector, k: usize) -> Result<Vec<ScoredCandidate>> {
    let dims = query.dim();
    if let Some(short) = candidates.iter().find(|c| c.embedding().dim() < dims) {
        return Err(Error::DimensionMismatch {
            required: dims,
            actual: short.embedding().dim(),
        });
    }

    let query_head = query.normalized_prefix(dims)?;
    let refs: Vec<&Candidate> = candidates.iter().collect();
    let mut scored = score_round(&refs, query_head.as_slice(), dims)?;
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k);

    Ok(scored
        .into_iter()
        .map(|(c, score)| ScoredCandidate::new(c.clone(), score))
        .collect())
}
