use crate::vector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored record: full-length embedding plus optional metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    #[serde(alias = "embedding")]
    pub vector: Vector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Integer(u64),
    Uuid(Uuid),
    String(String),
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointId::String(s) => write!(f, "{}", s),
            PointId::Uuid(u) => write!(f, "{}", u),
            PointId::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for PointId {
    fn from(s: String) -> Self {
        PointId::String(s)
    }
}

impl From<&str> for PointId {
    fn from(s: &str) -> Self {
        PointId::String(s.to_string())
    }
}

impl From<u64> for PointId {
    fn from(i: u64) -> Self {
        PointId::Integer(i)
    }
}

impl From<Uuid> for PointId {
    fn from(u: Uuid) -> Self {
        PointId::Uuid(u)
    }
}

impl Point {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<PointId>, vector: Vector, payload: Option<serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            vector,
            payload,
        }
    }

    /// Look up a string field in the payload, e.g. a title
    pub fn payload_str(&self, field: &str) -> Option<&str> {
        self.payload.as_ref()?.get(field)?.as_str()
    }
}
