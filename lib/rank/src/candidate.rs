//! Candidates flowing through the funnel.
//!
//! A [`Candidate`] is a shared, read-only handle to a stored point. Scores
//! live beside it in [`ScoredCandidate`] and are rebuilt every round, so the
//! same candidate can sit in several concurrent rankings at once.

use funnelx_core::{Point, PointId, Vector};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Candidate {
    point: Arc<Point>,
}

impl Candidate {
    pub fn new(point: impl Into<Arc<Point>>) -> Self {
        Self {
            point: point.into(),
        }
    }

    pub fn from_parts(
        id: impl Into<PointId>,
        embedding: Vector,
        payload: Option<serde_json::Value>,
    ) -> Self {
        Self::new(Point::new(id, embedding, payload))
    }

    #[inline]
    pub fn id(&self) -> &PointId {
        &self.point.id
    }

    #[inline]
    pub fn embedding(&self) -> &Vector {
        &self.point.vector
    }

    #[inline]
    pub fn point(&self) -> &Arc<Point> {
        &self.point
    }
}

impl From<Point> for Candidate {
    fn from(point: Point) -> Self {
        Self::new(point)
    }
}

impl From<Arc<Point>> for Candidate {
    fn from(point: Arc<Point>) -> Self {
        Self { point }
    }
}

/// A candidate together with the score from the most recent round
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f32,
}

impl ScoredCandidate {
    pub fn new(candidate: Candidate, score: f32) -> Self {
        Self { candidate, score }
    }

    #[inline]
    pub fn id(&self) -> &PointId {
        self.candidate.id()
    }
}

/// Strip scores, keeping order
pub fn into_candidates(scored: Vec<ScoredCandidate>) -> Vec<Candidate> {
    scored.into_iter().map(|s| s.candidate).collect()
}
