//! Bow excitation.
//!
//! The bow drives the string with a band-limited sawtooth (stick-slip) plus a
//! little second and third harmonic, mixed with white noise. More force means
//! more noise, more speed means less. The whole signal is gated by a linear
//! envelope that opens and closes in a fixed time.

use crate::noise::NoiseSource;
use crate::util::{next_blep_sample, this_blep_sample};
use arco_core::slew;
use std::f32::consts::TAU;

/// Time for the envelope to cover a full 0↔1 swing.
pub const ENVELOPE_SECS: f32 = 0.02;

/// Highest oscillator frequency as a fraction of the sample rate.
const MAX_FREQUENCY_RATIO: f32 = 0.45;

const MAX_NOISE_MIX: f32 = 0.8;

/// Observable bow state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BowState {
    pub is_bowing: bool,
    /// Current envelope level, 0-1
    pub envelope: f32,
    /// 0 or 1
    pub envelope_target: f32,
    /// Tonal phase, 0-1
    pub phase: f32,
}

/// Continuously running bow excitation source.
#[derive(Debug, Clone)]
pub struct BowExcitationGenerator {
    state: BowState,
    sample_rate: f32,
    envelope_step: f32,
    /// Pending PolyBLEP correction for the next sample
    next_saw: f32,
    noise: NoiseSource,
    noise_boost: f32,
}

impl BowExcitationGenerator {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_seed(sample_rate, 0x2545_f491)
    }

    pub fn with_seed(sample_rate: f32, seed: u32) -> Self {
        Self {
            state: BowState::default(),
            sample_rate,
            envelope_step: 1.0 / (ENVELOPE_SECS * sample_rate).max(1.0),
            next_saw: 0.0,
            noise: NoiseSource::new(seed),
            noise_boost: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.state.is_bowing = true;
        self.state.envelope_target = 1.0;
    }

    pub fn stop(&mut self) {
        self.state.is_bowing = false;
        self.state.envelope_target = 0.0;
    }

    /// Extra noise proportion (tremolo scratchiness), added before clamping.
    #[inline]
    pub fn set_noise_boost(&mut self, boost: f32) {
        self.noise_boost = boost;
    }

    pub fn state(&self) -> BowState {
        self.state
    }

    /// Noise proportion for the given bow force and speed.
    #[inline]
    pub fn noise_mix(&self, bow_force: f32, bow_speed: f32) -> f32 {
        (0.05 + 0.35 * bow_force - 0.25 * bow_speed + self.noise_boost).clamp(0.0, MAX_NOISE_MIX)
    }

    #[inline]
    pub fn process_sample(
        &mut self,
        bow_force: f32,
        bow_speed: f32,
        fundamental: f32,
        pitch_modulation: f32,
        amp_modulation: f32,
    ) -> f32 {
        self.state.envelope = slew(
            self.state.envelope,
            self.state.envelope_target,
            self.envelope_step,
        );

        let frequency = (fundamental * pitch_modulation)
            .clamp(0.0, self.sample_rate * MAX_FREQUENCY_RATIO);
        let increment = frequency / self.sample_rate;

        let mut this_saw = self.next_saw;
        self.state.phase += increment;
        let mut next_saw = 0.0;
        if self.state.phase >= 1.0 {
            self.state.phase -= 1.0;
            let t = self.state.phase / increment;
            this_saw -= this_blep_sample(t);
            next_saw -= next_blep_sample(t);
        }
        next_saw += self.state.phase;
        self.next_saw = next_saw;
        let saw = 2.0 * this_saw - 1.0;

        let phase = self.state.phase * TAU;
        let tonal = 0.7 * saw + 0.2 * (2.0 * phase).sin() + 0.1 * (3.0 * phase).sin();

        let noise_mix = self.noise_mix(bow_force, bow_speed);
        let noise = self.noise.next_sample();
        let mix = tonal * (1.0 - noise_mix) + noise * noise_mix;

        mix * bow_force * self.state.envelope * amp_modulation
    }
}
