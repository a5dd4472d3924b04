//! Modal string resonator bank.
//!
//! The string is a parallel bank of band-pass resonators, one per partial.
//! Partial `k` sits at `k·f0·sqrt(1 + B·k²)`, where the inharmonicity `B`
//! comes from the string material. Each mode is weighted by a brightness
//! dependent roll-off and by the comb filter produced by bowing at a fixed
//! point along the string.

use crate::biquad::{BiquadCoefficients, BiquadState};
use crate::cache::CoefficientCache;
use arco_core::{Error, Result, MAX_MODES};
use std::f32::consts::PI;

/// Smallest Q a mode is given.
const MIN_Q: f32 = 0.5;

/// String material presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StringMaterial {
    #[default]
    Steel,
    Gut,
    Nylon,
    Wound,
    Synthetic,
}

impl StringMaterial {
    pub const ALL: [StringMaterial; 5] = [
        StringMaterial::Steel,
        StringMaterial::Gut,
        StringMaterial::Nylon,
        StringMaterial::Wound,
        StringMaterial::Synthetic,
    ];

    /// Out-of-range indices clamp to the nearest preset.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Stiffness coefficient `B` of the stretch factor.
    pub fn inharmonicity(self) -> f32 {
        match self {
            StringMaterial::Steel => 0.000_12,
            StringMaterial::Gut => 0.000_05,
            StringMaterial::Nylon => 0.000_02,
            StringMaterial::Wound => 0.000_3,
            StringMaterial::Synthetic => 0.000_08,
        }
    }

    /// Divides the mode Q; lossier materials ring shorter.
    pub fn damping_multiplier(self) -> f32 {
        match self {
            StringMaterial::Steel => 1.0,
            StringMaterial::Gut => 1.4,
            StringMaterial::Nylon => 1.6,
            StringMaterial::Wound => 1.2,
            StringMaterial::Synthetic => 1.3,
        }
    }

    /// Scales how much the brightness control flattens the roll-off.
    pub fn brightness_scale(self) -> f32 {
        match self {
            StringMaterial::Steel => 1.2,
            StringMaterial::Gut => 0.8,
            StringMaterial::Nylon => 0.7,
            StringMaterial::Wound => 0.9,
            StringMaterial::Synthetic => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StringMaterial::Steel => "Steel",
            StringMaterial::Gut => "Gut",
            StringMaterial::Nylon => "Nylon",
            StringMaterial::Wound => "Wound",
            StringMaterial::Synthetic => "Synthetic",
        }
    }
}

/// Everything the mode coefficients depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringSettings {
    /// Fundamental in Hz
    pub fundamental: f32,
    /// Ring amount (0-1), higher rings longer
    pub damping: f32,
    /// 0-1
    pub brightness: f32,
    /// Normalized bow point (0-1), 0 near the bridge
    pub bow_position: f32,
    pub material: StringMaterial,
}

impl Default for StringSettings {
    fn default() -> Self {
        Self {
            fundamental: 220.0,
            damping: 0.5,
            brightness: 0.5,
            bow_position: 0.3,
            material: StringMaterial::Steel,
        }
    }
}

/// One partial of the string.
#[derive(Debug, Clone, Default)]
pub struct Mode {
    /// Mode number, starting at 1
    pub index: usize,
    /// Target frequency in Hz (may exceed Nyquist, then the mode is muted)
    pub frequency: f32,
    pub q: f32,
    /// Roll-off weight `1/k^p`
    pub amplitude: f32,
    /// Bow-position comb gain
    pub harmonic_gain: f32,
    pub coefficients: BiquadCoefficients,
    state: BiquadState,
}

impl Mode {
    pub fn pole_magnitude(&self) -> f32 {
        self.coefficients.pole_magnitude()
    }

    pub fn is_muted(&self) -> bool {
        self.coefficients.is_silent()
    }

    /// Contribution weight in the bank sum.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.amplitude * self.harmonic_gain
    }
}

/// Fixed-size bank of string modes.
pub struct ModalStringResonatorBank {
    modes: Vec<Mode>,
    sample_rate: f64,
    cache: CoefficientCache<StringSettings>,
}

impl ModalStringResonatorBank {
    /// Allocate `num_modes` modes (1..=[`MAX_MODES`]) configured with
    /// [`StringSettings::default`].
    pub fn new(num_modes: usize, sample_rate: f64) -> Result<Self> {
        if num_modes == 0 || num_modes > MAX_MODES {
            return Err(Error::InvalidConfig(format!(
                "num_modes {} out of range (1-{})",
                num_modes, MAX_MODES
            )));
        }
        if !(sample_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} must be positive",
                sample_rate
            )));
        }

        let mut modes = Vec::new();
        modes
            .try_reserve_exact(num_modes)
            .map_err(|_| Error::Allocation {
                what: "string modes",
                count: num_modes,
            })?;
        modes.extend((1..=num_modes).map(|index| Mode {
            index,
            ..Default::default()
        }));

        let mut bank = Self {
            modes,
            sample_rate,
            cache: CoefficientCache::new(),
        };
        bank.update(StringSettings::default());
        Ok(bank)
    }

    /// Recompute only when `settings` differ from the last ones applied.
    /// Returns whether a recompute happened.
    #[inline]
    pub fn update(&mut self, settings: StringSettings) -> bool {
        if !self.cache.needs_update(settings) {
            return false;
        }
        self.configure(
            settings.fundamental,
            settings.damping,
            settings.brightness,
            settings.bow_position,
            settings.material,
        );
        true
    }

    /// Recompute every mode's coefficients, weight and comb gain.
    ///
    /// Filter state is left untouched so a sounding string keeps ringing
    /// through the change.
    pub fn configure(
        &mut self,
        fundamental: f32,
        damping: f32,
        brightness: f32,
        bow_position: f32,
        material: StringMaterial,
    ) {
        let damping = damping.clamp(0.0, 1.0);
        let brightness = brightness.clamp(0.0, 1.0);
        let bow_position = bow_position.clamp(0.0, 1.0);

        let b = material.inharmonicity();
        let q_base = (8.0 + 48.0 * damping) / material.damping_multiplier();
        let rolloff = (1.5 - 0.8 * brightness * material.brightness_scale()).clamp(0.3, 2.0);
        let beta = 0.04 + 0.46 * bow_position;

        for mode in &mut self.modes {
            let k = mode.index as f32;
            mode.frequency = k * fundamental * (1.0 + b * k * k).sqrt();
            mode.q = (q_base / (1.0 + 0.25 * (k - 1.0))).max(MIN_Q);
            mode.amplitude = 1.0 / k.powf(rolloff);
            mode.harmonic_gain = 0.1 + 0.9 * (PI * k * beta).sin().abs();
            mode.coefficients = BiquadCoefficients::bandpass(
                mode.frequency as f64,
                mode.q as f64,
                self.sample_rate,
            );
        }
    }

    /// Run one excitation sample through every mode and sum the weighted outputs.
    #[inline]
    pub fn process_sample(&mut self, excitation: f32) -> f32 {
        let mut sum = 0.0;
        for mode in &mut self.modes {
            sum += mode.state.process(&mode.coefficients, excitation) * mode.weight();
        }
        sum
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn num_modes(&self) -> usize {
        self.modes.len()
    }

    pub fn recompute_count(&self) -> u64 {
        self.cache.recompute_count()
    }

    /// `true` while no filter state has blown up.
    pub fn is_finite(&self) -> bool {
        self.modes.iter().all(|m| m.state.is_finite())
    }
}
