//! Tolerance constants for audio testing.
//!
//! Different checks require different precision levels.

/// Floating point rounding errors (exact gain, copied channels).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// DSP processing tolerance (filter and oscillator phase accumulation).
pub const DSP_EPSILON: f32 = 1e-4;

/// Audio perceptual tolerance (~-60dB, inaudible differences).
/// Used as the per-sample jump bound for modulation multipliers.
pub const PERCEPTUAL_EPSILON: f32 = 0.001;

/// Silence threshold (~-80dB).
/// Values below this are considered silent.
pub const SILENCE_THRESHOLD: f32 = 0.0001;

/// RMS band for a sustained default tone.
pub const SUSTAIN_RMS_MIN: f32 = 0.005;
pub const SUSTAIN_RMS_MAX: f32 = 0.9;

/// Level a released note must fall below, relative to its sustained RMS.
pub const RELEASE_RATIO: f32 = 0.05;
