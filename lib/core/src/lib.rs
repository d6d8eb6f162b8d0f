//! # funnelx Core
//!
//! Core library for funnelx.
//!
//! This crate provides the building blocks the funnel ranker works on:
//!
//! - [`Vector`] - Dense embedding with prefix views and fallible normalization
//! - [`Point`] - An embedding with ID and optional payload
//! - [`Collection`] - In-memory coarse index searching on an embedding prefix
//!
//! ## Example
//!
//! ```rust
//! use funnelx_core::{Collection, CollectionConfig, Point, Vector};
//!
//! let collection = Collection::new(CollectionConfig {
//!     name: "docs".to_string(),
//!     vector_dim: 4,
//!     search_dim: 2,
//! })
//! .unwrap();
//!
//! let point = Point::new("p1", Vector::new(vec![1.0, 0.0, 0.3, 0.7]), None);
//! collection.upsert(point).unwrap();
//!
//! // Search takes only the first `search_dim` components of the query
//! let results = collection.search(&[1.0, 0.0], 10).unwrap();
//! assert_eq!(results.len(), 1);
//! ```

pub mod collection;
pub mod error;
pub mod point;
pub mod vector;

/// SIMD-optimized vector operations
///
/// - AVX2/FMA on x86_64
/// - NEON on ARM64/Apple Silicon
pub mod simd;

pub use collection::{Collection, CollectionConfig};
pub use error::{Error, Result};
pub use point::{Point, PointId};
pub use vector::{normalize_slice, Vector};
