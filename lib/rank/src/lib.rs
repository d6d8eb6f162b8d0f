//! # funnelx Rank
//!
//! Funnel search for Matryoshka embeddings.
//!
//! A coarse index returns the top-N hits on a short embedding prefix. The
//! [`FunnelRanker`] then re-scores those hits on longer and longer prefixes,
//! pruning a fixed fraction after each round, so full-length similarity is
//! only ever computed for a small pool.
//!
//! ## Example
//!
//! ```rust
//! use funnelx_rank::{Candidate, FunnelRanker, FunnelSchedule};
//! use funnelx_core::Vector;
//!
//! let candidates = vec![
//!     Candidate::from_parts("a", Vector::new(vec![1.0, 0.0, 0.0, 1.0]), None),
//!     Candidate::from_parts("b", Vector::new(vec![1.0, 0.0, 1.0, 0.0]), None),
//!     Candidate::from_parts("c", Vector::new(vec![0.0, 1.0, 1.0, 0.0]), None),
//! ];
//! let query = Vector::new(vec![1.0, 0.0, 1.0, 0.0]);
//!
//! let ranker = FunnelRanker::new(FunnelSchedule::new(vec![2, 4], 0.9).unwrap());
//! let refined = ranker.refine(&candidates, &query).unwrap();
//! assert_eq!(refined[0].id().to_string(), "b");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Embedder   │────>│   Coarse    │────>│   Funnel    │────> top-K
//! │ (text → v)  │     │ index v[:n] │     │   ranker    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod candidate;
pub mod embedder;
pub mod eval;
pub mod ranker;
pub mod schedule;
pub mod search;

pub use candidate::{Candidate, ScoredCandidate};
pub use embedder::{EmbeddingGenerator, HashingEmbedder, RawEmbedding};
pub use eval::{exact_ranking, recall_at_k};
pub use ranker::{refine, FunnelOutcome, FunnelRanker, RoundStats};
pub use schedule::{FunnelSchedule, DEFAULT_PRUNE_RATIO, DEFAULT_SCALES};
pub use search::{FunnelConfig, FunnelSearch, SimilarityIndex};
