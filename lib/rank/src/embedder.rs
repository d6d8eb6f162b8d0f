//! Embedding generator interface
//!
//! The ranker only ever sees [`Vector`]s. Model wrappers disagree on output
//! shape (bare lists, keyed maps, batches of one), so their raw output is
//! converted here through [`RawEmbedding`] before it reaches the funnel.

use funnelx_core::{Error, Result, Vector};
use serde::Deserialize;
use std::hash::{BuildHasher, Hash, Hasher};

/// Produces fixed-length, unnormalized embeddings for text
pub trait EmbeddingGenerator: Send + Sync {
    /// Output length D
    fn dim(&self) -> usize;

    fn embed(&self, text: &str) -> Result<Vector>;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

impl<T: EmbeddingGenerator + ?Sized> EmbeddingGenerator for std::sync::Arc<T> {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn embed(&self, text: &str) -> Result<Vector> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        (**self).embed_batch(texts)
    }
}

/// Raw model output in one of the shapes seen in the wild
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEmbedding {
    /// `[0.1, 0.2, ...]`
    Dense(Vec<f32>),
    /// `[[0.1, 0.2, ...]]`, a batch holding the single requested item
    Batch(Vec<Vec<f32>>),
    /// `{"dense": [...]}` or `{"embedding": [...]}`
    Keyed {
        #[serde(default, alias = "embedding", alias = "dense_vecs")]
        dense: Option<Vec<f32>>,
    },
}

impl RawEmbedding {
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn into_vector(self) -> Result<Vector> {
        let data = match self {
            RawEmbedding::Dense(v) => v,
            RawEmbedding::Batch(rows) => rows
                .into_iter()
                .next()
                .ok_or_else(|| Error::Embedding("empty embedding batch".to_string()))?,
            RawEmbedding::Keyed { dense } => {
                dense.ok_or_else(|| Error::Embedding("no dense vector in output".to_string()))?
            }
        };
        if data.is_empty() {
            return Err(Error::Embedding("empty embedding".to_string()));
        }
        Ok(Vector::new(data))
    }

    /// Convert and check the length against the model's declared dimension
    pub fn into_vector_of_dim(self, dim: usize) -> Result<Vector> {
        let v = self.into_vector()?;
        if v.dim() != dim {
            return Err(Error::InvalidDimension {
                expected: dim,
                actual: v.dim(),
            });
        }
        Ok(v)
    }
}

// Fixed seeds keep hashed embeddings stable for a given build
const HASH_SEEDS: (u64, u64, u64, u64) = (
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
);

/// Feature-hashing text embedder.
///
/// Words and character trigrams are hashed into signed buckets. Stands in
/// for a real model in tests and benchmarks: similar strings land near each
/// other, and the output is deterministic.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
    hasher: ahash::RandomState,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig("embedding dimension must be positive".to_string()));
        }
        let (k0, k1, k2, k3) = HASH_SEEDS;
        Ok(Self {
            dim,
            hasher: ahash::RandomState::with_seeds(k0, k1, k2, k3),
        })
    }

    fn bucket(&self, feature: &str) -> (usize, f32) {
        let mut h = self.hasher.build_hasher();
        feature.hash(&mut h);
        let hash = h.finish();
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        ((hash % self.dim as u64) as usize, sign)
    }
}

impl EmbeddingGenerator for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vector> {
        let lowered = text.to_lowercase();
        let mut data = vec![0.0f32; self.dim];
        let mut features = 0usize;

        for word in lowered.split_whitespace() {
            let (pos, sign) = self.bucket(word);
            data[pos] += 2.0 * sign;
            features += 1;

            let chars: Vec<char> = format!(" {} ", word).chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                let (pos, sign) = self.bucket(&trigram);
                data[pos] += sign;
            }
        }

        if features == 0 {
            return Err(Error::Embedding("cannot embed empty text".to_string()));
        }
        Ok(Vector::new(data))
    }
}
