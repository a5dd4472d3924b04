//! Second-order sections.
//!
//! Coefficients follow the RBJ audio-EQ cookbook, normalized so `a0 = 1`.
//! They are computed in f64 and stored as f32; the filter runs in
//! transposed direct form II.

use std::f64::consts::PI;

/// Lower bound on the bandwidth term, keeps every pole strictly inside the unit circle.
const MIN_ALPHA: f64 = 1e-5;

/// Normalized biquad coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BiquadCoefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passes nothing.
    pub const SILENT: Self = Self {
        b0: 0.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Constant 0 dB peak band-pass centred on `frequency`.
    ///
    /// Returns [`SILENT`](Self::SILENT) when `frequency` is not strictly
    /// between 0 and Nyquist or `q` is not positive.
    pub fn bandpass(frequency: f64, q: f64, sample_rate: f64) -> Self {
        let Some((cos_w0, alpha)) = Self::prewarp(frequency, q, sample_rate) else {
            return Self::SILENT;
        };
        let a0 = 1.0 + alpha;
        Self::normalized(alpha, 0.0, -alpha, -2.0 * cos_w0, 1.0 - alpha, a0)
    }

    /// Low-pass with resonance `q` at `frequency`.
    pub fn lowpass(frequency: f64, q: f64, sample_rate: f64) -> Self {
        let Some((cos_w0, alpha)) = Self::prewarp(frequency, q, sample_rate) else {
            return Self::SILENT;
        };
        let a0 = 1.0 + alpha;
        let b1 = 1.0 - cos_w0;
        let b0 = b1 * 0.5;
        Self::normalized(b0, b1, b0, -2.0 * cos_w0, 1.0 - alpha, a0)
    }

    fn prewarp(frequency: f64, q: f64, sample_rate: f64) -> Option<(f64, f64)> {
        if !(frequency > 0.0 && frequency < sample_rate * 0.5 && q > 0.0) {
            return None;
        }
        let w0 = 2.0 * PI * frequency / sample_rate;
        let alpha = (w0.sin() / (2.0 * q)).max(MIN_ALPHA);
        Some((w0.cos(), alpha))
    }

    fn normalized(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64, a0: f64) -> Self {
        let mut c = Self {
            b0: (b0 / a0) as f32,
            b1: (b1 / a0) as f32,
            b2: (b2 / a0) as f32,
            a1: (a1 / a0) as f32,
            a2: (a2 / a0) as f32,
        };
        // f32 rounding near DC or Nyquist can push a pole onto the unit
        // circle; keep |a1| strictly inside the stability triangle.
        let limit = (1.0 + c.a2) * (1.0 - 1e-6);
        if c.a1.abs() > limit {
            c.a1 = limit.copysign(c.a1);
        }
        c
    }

    #[inline]
    pub fn is_silent(&self) -> bool {
        *self == Self::SILENT
    }

    /// Magnitude of the larger pole of `1 + a1·z⁻¹ + a2·z⁻²`.
    pub fn pole_magnitude(&self) -> f32 {
        let a1 = self.a1 as f64;
        let a2 = self.a2 as f64;
        let discriminant = a1 * a1 - 4.0 * a2;
        if discriminant < 0.0 {
            // Complex conjugate pair, |z|² = a2
            a2.sqrt() as f32
        } else {
            let root = discriminant.sqrt();
            let r1 = (-a1 + root) * 0.5;
            let r2 = (-a1 - root) * 0.5;
            r1.abs().max(r2.abs()) as f32
        }
    }
}

/// Two-element filter state.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiquadState {
    z1: f32,
    z2: f32,
}

impl BiquadState {
    #[inline]
    pub fn process(&mut self, c: &BiquadCoefficients, input: f32) -> f32 {
        let output = c.b0 * input + self.z1;
        self.z1 = c.b1 * input - c.a1 * output + self.z2;
        self.z2 = c.b2 * input - c.a2 * output;
        output
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    pub fn is_finite(&self) -> bool {
        self.z1.is_finite() && self.z2.is_finite()
    }
}
