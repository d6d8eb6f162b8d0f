//! Funnel ranker
//!
//! Re-scores a coarse candidate list on successively longer embedding
//! prefixes, pruning after every round. Only the shrinking pool ever gets
//! scored at full length.
//!
//! ```text
//!  coarse top-N ──► dims=256 ──► prune ──► dims=512 ──► prune ──► dims=768 ──► prune ──► top-K
//! ```

use crate::candidate::{Candidate, ScoredCandidate};
use crate::schedule::FunnelSchedule;
use funnelx_core::{simd, Error, PointId, Result, Vector};
use rayon::prelude::*;
use tracing::{debug, debug_span};

/// Rounds with at least this many candidates score in parallel
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Statistics for one funnel round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStats {
    pub dims: usize,
    pub candidates_in: usize,
    pub candidates_out: usize,
    /// Best candidate of the round
    pub leader: PointId,
    pub leader_score: f32,
}

/// Refined ranking plus a per-round trace
#[derive(Debug, Clone)]
pub struct FunnelOutcome {
    pub results: Vec<ScoredCandidate>,
    pub rounds: Vec<RoundStats>,
}

#[derive(Debug, Clone, Default)]
pub struct FunnelRanker {
    schedule: FunnelSchedule,
}

impl FunnelRanker {
    pub fn new(schedule: FunnelSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &FunnelSchedule {
        &self.schedule
    }

    /// Refine `candidates` against `query`.
    ///
    /// Returns the survivors of the last round, best first. The caller takes
    /// the top K.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCandidateSet`] if `candidates` is empty
    /// - [`Error::DimensionMismatch`] if the query or any candidate is shorter
    ///   than the longest scale
    /// - [`Error::DegenerateVector`] if a scored prefix has zero norm
    pub fn refine(&self, candidates: &[Candidate], query: &Vector) -> Result<Vec<ScoredCandidate>> {
        self.refine_traced(candidates, query).map(|outcome| outcome.results)
    }

    /// Same as [`refine`](Self::refine), also reporting every round.
    pub fn refine_traced(&self, candidates: &[Candidate], query: &Vector) -> Result<FunnelOutcome> {
        self.validate(candidates, query)?;

        let span = debug_span!(
            "funnel_refine",
            candidates = candidates.len(),
            rounds = self.schedule.scales().len()
        );
        let _guard = span.enter();

        let mut survivors: Vec<&Candidate> = candidates.iter().collect();
        let mut scored: Vec<(&Candidate, f32)> = Vec::new();
        let mut rounds = Vec::with_capacity(self.schedule.scales().len());

        for &dims in self.schedule.scales() {
            let query_head = query.normalized_prefix(dims)?;
            scored = score_round(&survivors, query_head.as_slice(), dims)?;

            // Stable: equal scores keep the previous round's order
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));

            let candidates_in = scored.len();
            scored.truncate(self.schedule.retain_count(candidates_in));

            let (leader, leader_score) = (scored[0].0.id().clone(), scored[0].1);
            debug!(
                dims,
                candidates_in,
                candidates_out = scored.len(),
                leader = %leader,
                leader_score,
                "funnel round"
            );
            rounds.push(RoundStats {
                dims,
                candidates_in,
                candidates_out: scored.len(),
                leader,
                leader_score,
            });

            survivors = scored.iter().map(|(c, _)| *c).collect();
        }

        let results = scored
            .into_iter()
            .map(|(c, score)| ScoredCandidate::new(c.clone(), score))
            .collect();

        Ok(FunnelOutcome { results, rounds })
    }

    fn validate(&self, candidates: &[Candidate], query: &Vector) -> Result<()> {
        if candidates.is_empty() {
            return Err(Error::EmptyCandidateSet);
        }
        let required = self.schedule.max_dims();
        let shortest = std::iter::once(query.dim())
            .chain(candidates.iter().map(|c| c.embedding().dim()))
            .min()
            .unwrap_or(0);
        if shortest < required {
            return Err(Error::DimensionMismatch {
                required,
                actual: shortest,
            });
        }
        Ok(())
    }
}

/// Funnel-refine with an ad-hoc schedule.
///
/// Convenience over [`FunnelRanker`]; fails with [`Error::InvalidSchedule`]
/// when `scales` is empty or `prune_ratio` is outside `(0, 1)`.
pub fn refine(
    candidates: &[Candidate],
    query: &Vector,
    scales: &[usize],
    prune_ratio: f64,
) -> Result<Vec<ScoredCandidate>> {
    let schedule = FunnelSchedule::new(scales.to_vec(), prune_ratio)?;
    FunnelRanker::new(schedule).refine(candidates, query)
}

/// Cosine similarity of every candidate's `dims` prefix with a unit-length
/// query prefix. Output order matches input order.
pub(crate) fn score_round<'a>(
    candidates: &[&'a Candidate],
    query_head: &[f32],
    dims: usize,
) -> Result<Vec<(&'a Candidate, f32)>> {
    let score = |c: &&'a Candidate| -> Result<(&'a Candidate, f32)> {
        let head = c.embedding().normalized_prefix(dims)?;
        Ok((*c, simd::dot_product_simd(head.as_slice(), query_head)))
    };

    if candidates.len() >= PARALLEL_THRESHOLD {
        candidates.par_iter().map(score).collect()
    } else {
        candidates.iter().map(score).collect()
    }
}
