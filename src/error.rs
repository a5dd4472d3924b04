//! Unified error type for the Arco umbrella crate

/// Errors from any Arco subsystem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] arco_core::Error),
}

impl Error {
    /// True when a control call was rejected because the queue is full.
    pub fn is_queue_full(&self) -> bool {
        matches!(self, Error::Core(arco_core::Error::QueueFull))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
