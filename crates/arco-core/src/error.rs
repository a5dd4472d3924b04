//! Error types for arco-core.

use thiserror::Error;

/// Error type for engine construction and control operations.
///
/// Nothing in the per-sample path returns this; every runtime anomaly
/// (out-of-range parameter, unknown preset index, mode above Nyquist) is
/// clamped or silenced instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to allocate {count} {what}")]
    Allocation { what: &'static str, count: usize },

    #[error("Control queue is full")]
    QueueFull,
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
