//! Instrument body resonator.
//!
//! Five parallel band-pass resonances standing in for the air and plate modes
//! of the instrument body. Each preset is a fixed table of
//! `(frequency, Q, gain)` triples.

use crate::biquad::{BiquadCoefficients, BiquadState};
use crate::cache::CoefficientCache;

pub const NUM_BODY_MODES: usize = 5;

/// Fixed output gain applied to the summed resonances.
pub const BODY_OUTPUT_GAIN: f32 = 1.5;

/// Body presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyPreset {
    #[default]
    Violin,
    Viola,
    Cello,
    Guitar,
    None,
}

impl BodyPreset {
    pub const ALL: [BodyPreset; 5] = [
        BodyPreset::Violin,
        BodyPreset::Viola,
        BodyPreset::Cello,
        BodyPreset::Guitar,
        BodyPreset::None,
    ];

    /// Out-of-range indices clamp to the nearest preset.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// `(frequency Hz, Q, gain)` per mode.
    pub fn modes(self) -> [(f32, f32, f32); NUM_BODY_MODES] {
        match self {
            BodyPreset::Violin => [
                (275.0, 12.0, 1.0),
                (460.0, 15.0, 0.8),
                (550.0, 10.0, 0.7),
                (1000.0, 8.0, 0.5),
                (2800.0, 6.0, 0.35),
            ],
            BodyPreset::Viola => [
                (230.0, 12.0, 1.0),
                (380.0, 14.0, 0.8),
                (470.0, 10.0, 0.7),
                (850.0, 8.0, 0.5),
                (2300.0, 6.0, 0.35),
            ],
            BodyPreset::Cello => [
                (100.0, 10.0, 1.0),
                (180.0, 12.0, 0.85),
                (220.0, 10.0, 0.7),
                (600.0, 8.0, 0.5),
                (1800.0, 6.0, 0.3),
            ],
            BodyPreset::Guitar => [
                (100.0, 15.0, 1.0),
                (200.0, 12.0, 0.8),
                (400.0, 10.0, 0.6),
                (800.0, 8.0, 0.4),
                (2500.0, 5.0, 0.3),
            ],
            BodyPreset::None => [(1000.0, 1.0, 0.0); NUM_BODY_MODES],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyPreset::Violin => "Violin",
            BodyPreset::Viola => "Viola",
            BodyPreset::Cello => "Cello",
            BodyPreset::Guitar => "Guitar",
            BodyPreset::None => "None",
        }
    }
}

/// One body resonance.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyMode {
    pub frequency: f32,
    pub q: f32,
    /// Zero when the mode is disabled
    pub gain: f32,
    pub coefficients: BiquadCoefficients,
    state: BiquadState,
}

impl BodyMode {
    pub fn is_enabled(&self) -> bool {
        self.gain > 0.0 && !self.coefficients.is_silent()
    }
}

/// Parallel bank of body resonances.
pub struct BodyResonatorBank {
    modes: [BodyMode; NUM_BODY_MODES],
    sample_rate: f64,
    /// Every mode disabled: pass the input through
    transparent: bool,
    cache: CoefficientCache<BodyPreset>,
}

impl BodyResonatorBank {
    pub fn new(sample_rate: f64) -> Self {
        let mut bank = Self {
            modes: [BodyMode::default(); NUM_BODY_MODES],
            sample_rate,
            transparent: true,
            cache: CoefficientCache::new(),
        };
        bank.update(BodyPreset::default());
        bank
    }

    /// Recompute only when the preset changed. Returns whether it did.
    pub fn update(&mut self, preset: BodyPreset) -> bool {
        if !self.cache.needs_update(preset) {
            return false;
        }
        self.configure(preset);
        true
    }

    pub fn configure(&mut self, preset: BodyPreset) {
        self.configure_modes(preset.modes());
    }

    /// Load an arbitrary table. A triple with Q ≤ 0 or gain ≤ 0 disables its mode.
    pub fn configure_modes(&mut self, table: [(f32, f32, f32); NUM_BODY_MODES]) {
        for (mode, &(frequency, q, gain)) in self.modes.iter_mut().zip(table.iter()) {
            mode.frequency = frequency;
            mode.q = q;
            if q > 0.0 && gain > 0.0 {
                mode.gain = gain;
                mode.coefficients =
                    BiquadCoefficients::bandpass(frequency as f64, q as f64, self.sample_rate);
            } else {
                mode.gain = 0.0;
                mode.coefficients = BiquadCoefficients::SILENT;
            }
        }
        self.transparent = !self.modes.iter().any(BodyMode::is_enabled);
    }

    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        if self.transparent {
            return input;
        }
        let mut sum = 0.0;
        for mode in &mut self.modes {
            sum += mode.state.process(&mode.coefficients, input) * mode.gain;
        }
        sum * BODY_OUTPUT_GAIN
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn modes(&self) -> &[BodyMode; NUM_BODY_MODES] {
        &self.modes
    }

    pub fn recompute_count(&self) -> u64 {
        self.cache.recompute_count()
    }
}
