use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Candidate set is empty")]
    EmptyCandidateSet,

    #[error("Embedding too short: need at least {required} dimensions, got {actual}")]
    DimensionMismatch { required: usize, actual: usize },

    #[error("Cannot normalize zero vector (prefix of {dims} dimensions)")]
    DegenerateVector { dims: usize },

    #[error("Invalid funnel schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Point not found: {0}")]
    PointNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
