//! Error types

use thiserror::Error;

use crate::playback::PlaybackState;
use crate::trace::AlgorithmKind;

/// Errors raised while setting up a trace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The algorithm cannot continue from a mid-trace checkpoint
    #[error("{0} does not support resuming from a checkpoint")]
    UnsupportedResume(AlgorithmKind),

    /// Checkpoint does not fit the array it is applied to
    #[error("checkpoint outer index {outer_index} is out of bounds for {len} elements")]
    InvalidCheckpoint { outer_index: usize, len: usize },
}

/// Invalid visualizer configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("speed must be a positive number, got {0}")]
    InvalidSpeed(f64),

    #[error("array size must be positive")]
    InvalidArraySize,

    #[error("value range {min}..={max} is empty")]
    InvalidValueRange { min: u32, max: u32 },

    #[error("base delay must be positive")]
    InvalidBaseDelay,

    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Playback controller errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// Refused before any step was produced
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Operation not valid in the current session state
    #[error("cannot {operation} while {state:?}")]
    SessionConflict {
        operation: &'static str,
        state: PlaybackState,
    },

    /// Checkpointed resume requested for an algorithm that cannot do it
    #[error("{0} sessions cannot be resumed; stop and start again")]
    UnsupportedResume(AlgorithmKind),

    /// The background worker failed; the session has been returned to idle
    #[error("playback session failed: {0}")]
    SessionFailed(String),

    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
