//! Funnel search pipeline
//!
//! Embed the query, search the coarse index on a short prefix, then refine
//! the hits with the funnel ranker.

use crate::candidate::{into_candidates, Candidate, ScoredCandidate};
use crate::embedder::EmbeddingGenerator;
use crate::ranker::FunnelRanker;
use crate::schedule::FunnelSchedule;
use funnelx_core::{Collection, Error, Result, Vector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const DEFAULT_SEARCH_DIM: usize = 128;
pub const DEFAULT_SEARCH_LIMIT: usize = 128;
pub const DEFAULT_TOP_K: usize = 10;

/// Coarse similarity search over an embedding prefix
pub trait SimilarityIndex: Send + Sync {
    /// Prefix length the index was built over
    fn search_dim(&self) -> usize;

    /// Up to `limit` hits for a `search_dim`-long query prefix, best first,
    /// each carrying its full stored embedding
    fn search(&self, query_prefix: &[f32], limit: usize) -> Result<Vec<ScoredCandidate>>;
}

impl SimilarityIndex for Collection {
    fn search_dim(&self) -> usize {
        Collection::search_dim(self)
    }

    fn search(&self, query_prefix: &[f32], limit: usize) -> Result<Vec<ScoredCandidate>> {
        Ok(Collection::search(self, query_prefix, limit)?
            .into_iter()
            .map(|(point, score)| ScoredCandidate::new(Candidate::from(point), score))
            .collect())
    }
}

impl<T: SimilarityIndex + ?Sized> SimilarityIndex for Arc<T> {
    fn search_dim(&self) -> usize {
        (**self).search_dim()
    }

    fn search(&self, query_prefix: &[f32], limit: usize) -> Result<Vec<ScoredCandidate>> {
        (**self).search(query_prefix, limit)
    }
}

/// Pipeline configuration.
///
/// ```json
/// {
///   "search_dim": 128,
///   "search_limit": 128,
///   "top_k": 10,
///   "schedule": { "scales": [256, 512, 768], "prune_ratio": 0.5 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    pub search_dim: usize,
    pub search_limit: usize,
    pub top_k: usize,
    pub schedule: FunnelSchedule,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            search_dim: DEFAULT_SEARCH_DIM,
            search_limit: DEFAULT_SEARCH_LIMIT,
            top_k: DEFAULT_TOP_K,
            schedule: FunnelSchedule::default(),
        }
    }
}

impl FunnelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.search_dim == 0 {
            return Err(Error::InvalidConfig("search_dim must be positive".to_string()));
        }
        if self.search_limit == 0 {
            return Err(Error::InvalidConfig("search_limit must be positive".to_string()));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be positive".to_string()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: FunnelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Embedder + coarse index + funnel ranker
pub struct FunnelSearch<E, I> {
    embedder: E,
    index: I,
    config: FunnelConfig,
    ranker: FunnelRanker,
}

impl<E: EmbeddingGenerator, I: SimilarityIndex> FunnelSearch<E, I> {
    /// Checks that the index prefix matches `search_dim` and that the model
    /// output is long enough for every scale.
    pub fn new(embedder: E, index: I, config: FunnelConfig) -> Result<Self> {
        config.validate()?;
        if index.search_dim() != config.search_dim {
            return Err(Error::InvalidConfig(format!(
                "index searches on {} dims but search_dim is {}",
                index.search_dim(),
                config.search_dim
            )));
        }
        let needed = config.schedule.max_dims().max(config.search_dim);
        if embedder.dim() < needed {
            return Err(Error::InvalidConfig(format!(
                "embedder produces {} dims, schedule needs {}",
                embedder.dim(),
                needed
            )));
        }
        let ranker = FunnelRanker::new(config.schedule.clone());
        Ok(Self {
            embedder,
            index,
            config,
            ranker,
        })
    }

    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Top-K for a text query
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, query: &str) -> Result<Vec<ScoredCandidate>> {
        let embedding = self.embedder.embed(query)?;
        self.search_embedding(&embedding)
    }

    /// Top-K for a pre-computed query embedding
    #[instrument(level = "debug", skip_all, fields(dim = query.dim()))]
    pub fn search_embedding(&self, query: &Vector) -> Result<Vec<ScoredCandidate>> {
        let coarse = self.coarse_search(query)?;
        if coarse.is_empty() {
            debug!("coarse search returned nothing");
            return Ok(Vec::new());
        }

        let candidates = into_candidates(coarse);
        let mut refined = self.ranker.refine(&candidates, query)?;
        refined.truncate(self.config.top_k);
        Ok(refined)
    }

    /// Coarse hits on the `search_dim` prefix alone, before any refinement
    pub fn coarse_search(&self, query: &Vector) -> Result<Vec<ScoredCandidate>> {
        let prefix = query.prefix(self.config.search_dim)?;
        self.index.search(prefix, self.config.search_limit)
    }
}
