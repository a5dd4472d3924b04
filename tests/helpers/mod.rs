//! Test helpers and fixtures for Arco integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (copied channels, unity gain)
//! - `DSP_EPSILON` (1e-4): DSP processing (phase accumulation)
//! - `PERCEPTUAL_EPSILON` (0.001): Per-sample modulation jumps (-60dB)
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)

#![allow(dead_code)]

pub mod tolerances;

use arco::prelude::*;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: f64 = 44100.0;

/// Standard buffer size for deterministic testing
pub const TEST_BUFFER_SIZE: usize = 512;

/// Create an engine with default settings at the test sample rate.
pub fn test_engine() -> (ArcoEngine, ArcoHandle) {
    ArcoEngine::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .build()
        .expect("Failed to create test engine")
}

/// Create an engine with a specific sample rate.
pub fn test_engine_with_sr(sample_rate: f64) -> (ArcoEngine, ArcoHandle) {
    ArcoEngine::builder()
        .sample_rate(sample_rate)
        .build()
        .expect("Failed to create test engine")
}

/// Number of samples in `seconds` at the test sample rate.
pub fn samples(seconds: f64) -> usize {
    (seconds * TEST_SAMPLE_RATE) as usize
}

/// Render `num_samples` of mono output in `TEST_BUFFER_SIZE` slices.
pub fn render(engine: &mut ArcoEngine, num_samples: usize) -> Vec<f32> {
    let mut output = vec![0.0f32; num_samples];
    for chunk in output.chunks_mut(TEST_BUFFER_SIZE) {
        engine.process(chunk);
    }
    output
}

/// Render one sample at a time, calling `inspect` after each.
pub fn render_each<F>(engine: &mut ArcoEngine, num_samples: usize, mut inspect: F)
where
    F: FnMut(&ArcoEngine, f32),
{
    let mut sample = [0.0f32; 1];
    for _ in 0..num_samples {
        engine.process(&mut sample);
        inspect(engine, sample[0]);
    }
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Largest absolute difference between consecutive values.
pub fn max_step(values: &[f32]) -> f32 {
    values
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0_f32, f32::max)
}

pub fn is_silent(samples: &[f32], threshold: f32) -> bool {
    peak(samples) <= threshold
}

pub fn assert_is_silent(samples: &[f32], threshold: f32, context: &str) {
    let max = peak(samples);
    assert!(
        max <= threshold,
        "{}: expected silence, but peak amplitude was {}",
        context,
        max
    );
}

pub fn assert_not_silent(samples: &[f32], min_rms: f32, context: &str) {
    let r = rms(samples);
    assert!(
        r >= min_rms,
        "{}: expected audio content with RMS >= {}, but RMS was {}",
        context,
        min_rms,
        r
    );
}

pub fn assert_all_finite(samples: &[f32], context: &str) {
    if let Some(i) = samples.iter().position(|s| !s.is_finite()) {
        panic!("{}: sample {} is {}", context, i, samples[i]);
    }
}
