//! Builder for configuring and constructing an `ArcoEngine`.

use crate::{ArcoEngine, ArcoHandle, Result};
use arco_core::{control_channel, EngineConfig, Program};
use arco_synth::Engine;

/// Everything has a default; only override what you need.
///
/// # Example
///
/// ```
/// use arco::prelude::*;
///
/// let (mut engine, mut handle) = ArcoEngine::builder()
///     .sample_rate(48000.0)
///     .modes(24)
///     .build()?;
///
/// handle.start_sounding()?;
///
/// let mut block = [0.0f32; 256];
/// engine.process(&mut block);
/// # Ok::<(), arco::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArcoEngineBuilder {
    config: EngineConfig,
    program: Option<Program>,
}

impl ArcoEngineBuilder {
    /// Default: 44100
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Longest slice rendered between control drains. Default: 128
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = block_size;
        self
    }

    /// Number of string modes (partials). Default: 16
    pub fn modes(mut self, num_modes: usize) -> Self {
        self.config.num_modes = num_modes;
        self
    }

    /// Default: 256
    pub fn control_capacity(mut self, capacity: usize) -> Self {
        self.config.control_capacity = capacity;
        self
    }

    /// Output channels for `process_channels`. Default: 2
    pub fn channels(mut self, channels: usize) -> Self {
        self.config.channels = channels;
        self
    }

    /// Applied directly to the engine before it is returned.
    pub fn program(mut self, program: Program) -> Self {
        self.program = Some(program);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<(ArcoEngine, ArcoHandle)> {
        self.config.validate()?;

        let mut voice = Engine::new(&self.config)?;
        if let Some(program) = &self.program {
            voice.load_program(program);
        }

        let (producer, consumer) = control_channel(self.config.control_capacity)?;
        Ok((
            ArcoEngine::from_parts(voice, consumer),
            ArcoHandle::from_producer(producer),
        ))
    }
}
