//! Engine configuration.

use crate::{Error, Result};

/// Largest number of string modes a resonator bank can hold.
pub const MAX_MODES: usize = 32;

/// Largest block the engine renders between two control-queue drains.
pub const MAX_BLOCK_SIZE: usize = 8192;

/// Configuration for the synthesis engine.
///
/// Everything here is fixed for the lifetime of an engine instance; the
/// performance parameters live in [`ParameterStore`](crate::ParameterStore).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Samples rendered per control drain
    pub block_size: usize,
    /// Number of modes in the string resonator bank
    pub num_modes: usize,
    /// Capacity of the control-message queue
    pub control_capacity: usize,
    /// Output channels (the mono voice is copied to each)
    pub channels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            block_size: 128,
            num_modes: 16,
            control_capacity: 256,
            channels: 2,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(8000.0..=384000.0).contains(&self.sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(Error::InvalidConfig(format!(
                "block_size {} out of range (1-{})",
                self.block_size, MAX_BLOCK_SIZE
            )));
        }
        if self.num_modes == 0 || self.num_modes > MAX_MODES {
            return Err(Error::InvalidConfig(format!(
                "num_modes {} out of range (1-{})",
                self.num_modes, MAX_MODES
            )));
        }
        if self.control_capacity == 0 {
            return Err(Error::InvalidConfig(
                "control_capacity must be at least 1".into(),
            ));
        }
        if self.channels == 0 {
            return Err(Error::InvalidConfig("channels must be at least 1".into()));
        }
        Ok(())
    }

    /// Sample rate as f32, the precision the DSP stages run at.
    #[inline]
    pub fn sample_rate_f32(&self) -> f32 {
        self.sample_rate as f32
    }
}
