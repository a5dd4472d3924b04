//! Expression subsystem: vibrato, tremolo and trill layered on the bowed tone.
//!
//! Each processor runs continuously and is never reset. What is heard is
//! decided by [`ExpressionEngine`]: a smoothed mix level per processor and a
//! [`TransitionMachine`] that ramps the current expression in and out.

mod mixer;
mod transition;
mod tremolo;
mod trill;
mod vibrato;

pub use mixer::{ExpressionEngine, ExpressionParams, MIX_SMOOTHING_SECS};
pub use transition::{ExpressionState, TransitionMachine, TransitionPhase, WAIT_TIMEOUT_SECS};
pub use tremolo::{StrokeDirection, TremoloProcessor, GAP_LEVEL};
pub use trill::{TrillNote, TrillProcessor};
pub use vibrato::VibratoProcessor;

/// Modulation signals for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpressionOutput {
    /// Frequency multiplier for the excitation
    pub pitch: f32,
    /// Frequency multiplier for the string resonator: the fingered note
    pub string_pitch: f32,
    /// Level multiplier for the excitation
    pub amplitude: f32,
    /// Extra bow noise proportion (tremolo scratchiness)
    pub noise_boost: f32,
    /// Tone-filter darkening, 0-1
    pub darkening: f32,
    /// Tremolo bow speed, 0-1
    pub bow_speed: f32,
    /// Trill note-onset brightening, 0-1
    pub trill_onset: f32,
}

impl ExpressionOutput {
    /// No modulation.
    pub const NEUTRAL: Self = Self {
        pitch: 1.0,
        string_pitch: 1.0,
        amplitude: 1.0,
        noise_boost: 0.0,
        darkening: 0.0,
        bow_speed: 0.0,
        trill_onset: 0.0,
    };

    /// Blend toward neutral: multipliers become `1 + (m - 1)·scale`, the
    /// other signals are multiplied by `scale`.
    #[inline]
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            pitch: 1.0 + (self.pitch - 1.0) * scale,
            string_pitch: 1.0 + (self.string_pitch - 1.0) * scale,
            amplitude: 1.0 + (self.amplitude - 1.0) * scale,
            noise_boost: self.noise_boost * scale,
            darkening: self.darkening * scale,
            bow_speed: self.bow_speed * scale,
            trill_onset: self.trill_onset * scale,
        }
    }
}

impl Default for ExpressionOutput {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
