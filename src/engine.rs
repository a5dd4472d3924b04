//! ArcoEngine (audio side) and ArcoHandle (control side).

use crate::builder::ArcoEngineBuilder;
use crate::Result;
use arco_core::{
    ControlConsumer, ControlMessage, ControlProducer, EngineConfig, ExpressionKind, ParamId,
    Program, TransitionConfig,
};
use arco_dsp::BowState;
use arco_synth::{Engine, ExpressionState};

/// Audio-thread half of an Arco voice.
///
/// Owns the bowed-string [`Engine`] and the consumer end of the control
/// queue. Pending control messages are applied at the start of every call
/// and between `block_size` chunks, never in the middle of a chunk.
///
/// # Example
///
/// ```
/// use arco::prelude::*;
///
/// let (mut engine, mut handle) = ArcoEngine::builder().channels(2).build()?;
/// handle.set_parameter(ParamId::FundamentalFrequency, 330.0)?;
/// handle.set_expression(ExpressionKind::Tremolo)?;
/// handle.start_sounding()?;
///
/// let mut left = vec![0.0f32; 512];
/// let mut right = vec![0.0f32; 512];
/// engine.process_channels(&mut [&mut left[..], &mut right[..]]);
/// assert_eq!(left, right);
/// # Ok::<(), arco::Error>(())
/// ```
pub struct ArcoEngine {
    voice: Engine,
    controls: ControlConsumer,
}

impl ArcoEngine {
    pub fn builder() -> ArcoEngineBuilder {
        ArcoEngineBuilder::default()
    }

    pub(crate) fn from_parts(voice: Engine, controls: ControlConsumer) -> Self {
        Self { voice, controls }
    }

    /// Render mono output in place.
    pub fn process(&mut self, output: &mut [f32]) {
        let block_size = self.voice.config().block_size;
        self.drain_controls();
        for (i, chunk) in output.chunks_mut(block_size).enumerate() {
            if i > 0 {
                self.drain_controls();
            }
            self.voice.process_block(chunk);
        }
    }

    /// Render the same signal into the first [`channels`](Self::channels)
    /// slices. Slices past the configured count are left untouched.
    ///
    /// Only the frames common to the written channels are filled.
    pub fn process_channels(&mut self, channels: &mut [&mut [f32]]) {
        let count = channels.len().min(self.channels());
        let channels = &mut channels[..count];
        let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        let Some((first, rest)) = channels.split_first_mut() else {
            return;
        };

        let first = &mut first[..frames];
        self.process(first);
        for channel in rest {
            channel[..frames].copy_from_slice(first);
        }
    }

    fn drain_controls(&mut self) {
        while let Some(message) = self.controls.pop() {
            self.voice.apply(message);
        }
    }

    #[inline]
    pub fn pending_controls(&self) -> usize {
        self.controls.pending_count()
    }

    pub fn expression_state(&self) -> ExpressionState {
        self.voice.expression_state()
    }

    pub fn bow_state(&self) -> BowState {
        self.voice.bow_state()
    }

    /// Direct access to the voice, for inspection.
    pub fn voice(&self) -> &Engine {
        &self.voice
    }

    /// Direct access to the voice, bypassing the control queue.
    pub fn voice_mut(&mut self) -> &mut Engine {
        &mut self.voice
    }

    pub fn config(&self) -> &EngineConfig {
        self.voice.config()
    }

    pub fn sample_rate(&self) -> f64 {
        self.config().sample_rate
    }

    pub fn block_size(&self) -> usize {
        self.config().block_size
    }

    pub fn channels(&self) -> usize {
        self.config().channels
    }
}

/// Control-side half of an Arco voice.
///
/// Every call is non-blocking. When the queue is full the message is dropped
/// and `Error::QueueFull` is returned; nothing is applied partially.
pub struct ArcoHandle {
    producer: ControlProducer,
}

impl ArcoHandle {
    pub(crate) fn from_producer(producer: ControlProducer) -> Self {
        Self { producer }
    }

    pub fn start_sounding(&mut self) -> Result<()> {
        self.send(ControlMessage::StartSounding)
    }

    pub fn stop_sounding(&mut self) -> Result<()> {
        self.send(ControlMessage::StopSounding)
    }

    /// The value is clamped to the parameter's range on the audio thread.
    pub fn set_parameter(&mut self, id: ParamId, value: f32) -> Result<()> {
        self.send(ControlMessage::SetParameter { id, value })
    }

    pub fn set_expression(&mut self, kind: ExpressionKind) -> Result<()> {
        self.send(ControlMessage::SetExpression(kind))
    }

    pub fn configure_transition(&mut self, config: TransitionConfig) -> Result<()> {
        self.send(ControlMessage::ConfigureTransition(config))
    }

    /// Queue a whole program, or nothing if it does not fit.
    pub fn load_program(&mut self, program: &Program) -> Result<()> {
        self.producer.push_program(program).map_err(|e| {
            tracing::warn!(
                "Control queue full, dropped program '{}' ({} messages)",
                program.name,
                program.message_count()
            );
            e
        })?;
        tracing::debug!("Queued program '{}'", program.name);
        Ok(())
    }

    /// Free slots in the control queue.
    pub fn capacity_remaining(&self) -> usize {
        self.producer.vacant_len()
    }

    fn send(&mut self, message: ControlMessage) -> Result<()> {
        self.producer.push(message).map_err(|e| {
            tracing::warn!("Control queue full, dropped {:?}", message);
            e
        })?;
        Ok(())
    }
}
