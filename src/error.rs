use thiserror::Error;

use crate::axis::Axis;

#[derive(Error, Debug)]
pub enum CompassError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown axis: {0}")]
    UnknownAxis(String),

    #[error("Score out of range for {axis}: {value} (expected -1..=1)")]
    ScoreOutOfRange { axis: Axis, value: f64 },

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CompassError>;
