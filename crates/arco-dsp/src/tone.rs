//! Brightness low-pass.

use crate::biquad::{BiquadCoefficients, BiquadState};

const TONE_Q: f64 = 0.707;
const MIN_CUTOFF: f32 = 80.0;
const MAX_CUTOFF_RATIO: f32 = 0.45;

/// Relative cutoff change below which the coefficients are kept.
const RECOMPUTE_THRESHOLD: f32 = 0.01;

/// Inputs that move the effective cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToneControls {
    pub brightness: f32,
    pub bow_force: f32,
    /// Trill note-onset brightening, 0-1
    pub trill_onset: f32,
    /// Tremolo bow speed, 0-1
    pub tremolo_bow_speed: f32,
    /// Tremolo tone darkening, 0-1
    pub darkening: f32,
}

/// RBJ low-pass whose cutoff tracks brightness, force and expression.
#[derive(Debug, Clone)]
pub struct ToneFilter {
    coefficients: BiquadCoefficients,
    state: BiquadState,
    sample_rate: f32,
    /// Cutoff the coefficients were computed for
    cutoff: f32,
    recomputes: u64,
}

impl ToneFilter {
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            coefficients: BiquadCoefficients::SILENT,
            state: BiquadState::default(),
            sample_rate,
            cutoff: 0.0,
            recomputes: 0,
        };
        filter.recompute(filter.effective_cutoff(&ToneControls {
            brightness: 0.5,
            bow_force: 0.5,
            ..Default::default()
        }));
        filter
    }

    /// Cutoff in Hz for the given controls, clamped to [80 Hz, 0.45·fs].
    pub fn effective_cutoff(&self, controls: &ToneControls) -> f32 {
        let base = 500.0 * (5.0 * controls.brightness).exp2();
        let lift = 1.0
            + 0.6 * controls.bow_force
            + 0.4 * controls.trill_onset
            + 0.3 * controls.tremolo_bow_speed;
        let cutoff = base * lift * (1.0 - 0.5 * controls.darkening);
        cutoff.clamp(MIN_CUTOFF, self.sample_rate * MAX_CUTOFF_RATIO)
    }

    /// Retarget the filter. Coefficients are only recomputed when the cutoff
    /// moved more than 1% from the one they were computed for.
    #[inline]
    pub fn set_controls(&mut self, controls: &ToneControls) -> bool {
        let cutoff = self.effective_cutoff(controls);
        if (cutoff - self.cutoff).abs() <= self.cutoff * RECOMPUTE_THRESHOLD {
            return false;
        }
        self.recompute(cutoff);
        true
    }

    fn recompute(&mut self, cutoff: f32) {
        self.cutoff = cutoff;
        self.coefficients =
            BiquadCoefficients::lowpass(cutoff as f64, TONE_Q, self.sample_rate as f64);
        self.recomputes += 1;
    }

    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        self.state.process(&self.coefficients, input)
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}
