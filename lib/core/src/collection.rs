use crate::vector::normalize_slice;
use crate::{Error, Point, PointId, Result};
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// Configuration for a collection
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    pub name: String,
    /// Full embedding length stored per point
    pub vector_dim: usize,
    /// Prefix length the coarse index searches on
    pub search_dim: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            vector_dim: 768,
            search_dim: 128,
        }
    }
}

impl CollectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.search_dim == 0 {
            return Err(Error::InvalidConfig("search_dim must be positive".to_string()));
        }
        if self.search_dim > self.vector_dim {
            return Err(Error::InvalidConfig(format!(
                "search_dim {} exceeds vector_dim {}",
                self.search_dim, self.vector_dim
            )));
        }
        Ok(())
    }
}

struct Entry {
    point: Arc<Point>,
    /// Unit-length copy of the first `search_dim` components
    head: Vec<f32>,
}

/// In-memory coarse index.
///
/// Stores full-length embeddings but ranks by cosine similarity on the
/// first `search_dim` components only.
pub struct Collection {
    config: CollectionConfig,
    points: RwLock<AHashMap<PointId, Entry>>,
}

impl Collection {
    pub fn new(config: CollectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            points: RwLock::new(AHashMap::new()),
        })
    }

    pub fn search_dim(&self) -> usize {
        self.config.search_dim
    }

    pub fn count(&self) -> usize {
        self.points.read().len()
    }

    /// Insert or replace a point
    pub fn upsert(&self, point: Point) -> Result<()> {
        let entry = self.prepare(point)?;
        trace!(collection = %self.config.name, id = %entry.point.id, "upsert");
        self.points.write().insert(entry.point.id.clone(), entry);
        Ok(())
    }

    /// Insert many points; nothing is inserted if any point is rejected
    pub fn batch_upsert(&self, points: Vec<Point>) -> Result<()> {
        let entries = points
            .into_iter()
            .map(|p| self.prepare(p))
            .collect::<Result<Vec<_>>>()?;

        let mut map = self.points.write();
        map.reserve(entries.len());
        for entry in entries {
            map.insert(entry.point.id.clone(), entry);
        }
        debug!(collection = %self.config.name, total = map.len(), "batch upsert");
        Ok(())
    }

    fn prepare(&self, point: Point) -> Result<Entry> {
        if point.vector.dim() != self.config.vector_dim {
            return Err(Error::InvalidDimension {
                expected: self.config.vector_dim,
                actual: point.vector.dim(),
            });
        }
        let head = normalize_slice(point.vector.prefix(self.config.search_dim)?)?;
        Ok(Entry {
            point: Arc::new(point),
            head,
        })
    }

    pub fn get(&self, id: &PointId) -> Option<Arc<Point>> {
        self.points.read().get(id).map(|e| Arc::clone(&e.point))
    }

    /// Remove a point, failing if it is not present
    pub fn delete(&self, id: &PointId) -> Result<()> {
        match self.points.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(Error::PointNotFound(id.to_string())),
        }
    }

    /// Top `limit` points by cosine similarity on the search prefix.
    ///
    /// `query_prefix` must be exactly `search_dim` long. Equal scores are
    /// ordered by ascending id so results do not depend on map order.
    pub fn search(&self, query_prefix: &[f32], limit: usize) -> Result<Vec<(Arc<Point>, f32)>> {
        if query_prefix.len() != self.config.search_dim {
            return Err(Error::InvalidDimension {
                expected: self.config.search_dim,
                actual: query_prefix.len(),
            });
        }
        let query = normalize_slice(query_prefix)?;

        let points = self.points.read();
        let mut results: Vec<(Arc<Point>, f32)> = points
            .values()
            .map(|entry| {
                let score = crate::simd::dot_product_simd(&entry.head, &query);
                (Arc::clone(&entry.point), score)
            })
            .collect();
        drop(points);

        results.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
        results.truncate(limit);

        debug!(
            collection = %self.config.name,
            search_dim = self.config.search_dim,
            limit,
            returned = results.len(),
            "coarse search"
        );
        Ok(results)
    }

    /// Snapshot of all stored points
    pub fn iter(&self) -> Vec<Arc<Point>> {
        self.points.read().values().map(|e| Arc::clone(&e.point)).collect()
    }
}
