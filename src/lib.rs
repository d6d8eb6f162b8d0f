//! # funnelx
//!
//! Matryoshka funnel search.
//!
//! Embeddings trained with Matryoshka Representation Learning stay useful when
//! truncated: the first 128 of 768 dimensions already rank documents
//! reasonably well. funnelx exploits that in two steps:
//!
//! 1. **Coarse**: search a cheap index built over a short prefix
//! 2. **Funnel**: re-score the hits on growing prefixes (e.g. 256, 512, 768
//!    dimensions), keeping only the best fraction after each round
//!
//! Recall lost by the short-prefix search is recovered while full-length
//! similarity is computed only for the final handful of candidates.
//!
//! ## Quick Start
//!
//! ```rust
//! use funnelx::prelude::*;
//!
//! let embedder = HashingEmbedder::new(64).unwrap();
//! let collection = Collection::new(CollectionConfig {
//!     name: "movies".to_string(),
//!     vector_dim: 64,
//!     search_dim: 32,
//! })
//! .unwrap();
//!
//! for (i, title) in ["alien invasion", "space robots", "paris romance"].iter().enumerate() {
//!     let vector = embedder.embed(title).unwrap();
//!     collection.upsert(Point::new(i as u64, vector, None)).unwrap();
//! }
//!
//! let config = FunnelConfig {
//!     search_dim: 32,
//!     search_limit: 3,
//!     top_k: 1,
//!     schedule: FunnelSchedule::new(vec![48, 64], 0.9).unwrap(),
//! };
//! let search = FunnelSearch::new(embedder, collection, config).unwrap();
//! let results = search.search("alien invasion").unwrap();
//! assert_eq!(results[0].id().to_string(), "0");
//! ```
//!
//! ## Crate Structure
//!
//! - [`funnelx-core`](https://docs.rs/funnelx-core) - Vector, Point, SIMD kernels, prefix Collection
//! - [`funnelx-rank`](https://docs.rs/funnelx-rank) - Funnel ranker, schedule, embedder and index traits, pipeline

pub use funnelx_core::{Collection, CollectionConfig, Error, Point, PointId, Result, Vector};

pub use funnelx_rank::{
    exact_ranking, recall_at_k, refine, Candidate, EmbeddingGenerator, FunnelConfig,
    FunnelOutcome, FunnelRanker, FunnelSchedule, FunnelSearch, HashingEmbedder, RawEmbedding,
    RoundStats, ScoredCandidate, SimilarityIndex,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Candidate, Collection, CollectionConfig, EmbeddingGenerator, Error, FunnelConfig,
        FunnelRanker, FunnelSchedule, FunnelSearch, HashingEmbedder, Point, PointId, Result,
        ScoredCandidate, SimilarityIndex, Vector,
    };
}

/// SIMD-optimized vector operations
pub mod simd {
    pub use funnelx_core::simd::{dot_product_simd, norm_simd};
}
