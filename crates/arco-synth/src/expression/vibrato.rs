//! Vibrato: slow periodic pitch and level wobble.

use super::ExpressionOutput;
use std::f32::consts::TAU;

/// Peak pitch deviation as a frequency ratio.
const PITCH_DEPTH: f32 = 0.06;
/// Peak amplitude deviation.
const AMPLITUDE_DEPTH: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct VibratoProcessor {
    /// 0-1, never reset
    phase: f32,
    sample_rate: f32,
}

impl VibratoProcessor {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    #[inline]
    pub fn advance(&mut self, rate_hz: f32) {
        self.phase += rate_hz.max(0.0) / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }
    }

    #[inline]
    pub fn output(&self) -> ExpressionOutput {
        let s = (TAU * self.phase).sin();
        ExpressionOutput {
            pitch: 1.0 + s * PITCH_DEPTH,
            amplitude: 1.0 + s * AMPLITUDE_DEPTH,
            ..ExpressionOutput::NEUTRAL
        }
    }

    /// Vibrato can be released at any point of its cycle.
    #[inline]
    pub fn can_stop(&self) -> bool {
        true
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}
