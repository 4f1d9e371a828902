use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotationError {
    #[error("verse source unavailable: {origin}: {source}")]
    SourceUnavailable {
        origin: String,
        source: std::io::Error,
    },
    #[error("verse source has no verses: {0}")]
    EmptySource(String),
    #[error("could not initialize rotation state: {0}")]
    InitializationFailed(#[source] Box<RotationError>),
    #[error("could not persist rotation state: {0}")]
    PersistenceFailed(#[source] StateError),
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("malformed rotation state: {0}")]
    Parse(String),
    #[error("rotation state io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the state used for this run came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateSource {
    Persisted,
    Fresh,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub verse: String,
    /// True when this pick exhausted the permutation and a new one was drawn.
    pub cycle_completed: bool,
}
