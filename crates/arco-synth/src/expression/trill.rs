//! Trill: rapid alternation between the written note and the note above.
//!
//! A cycle is a lower half and an upper half. Each half has an active window
//! where the note sounds and a gap where the finger lifts. During gaps the
//! pitch of the last sounding note is held.

use super::ExpressionOutput;
use arco_core::ExponentialSmoother;
use arco_dsp::NoiseSource;

const SPEED_SMOOTHING_SECS: f32 = 0.05;
const AMPLITUDE_SMOOTHING_SECS: f32 = 0.003;

const LOWER_LEVEL: f32 = 0.9;
const UPPER_LEVEL: f32 = 1.1;
const GAP_LEVEL: f32 = 0.25;

/// Fraction of a cycle at its start where a stop is allowed.
const STOP_WINDOW: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrillNote {
    Lower,
    Upper,
}

#[derive(Debug, Clone)]
pub struct TrillProcessor {
    /// Position in the lower+upper cycle, 0-1, never reset
    phase: f32,
    speed: ExponentialSmoother,
    amplitude: ExponentialSmoother,
    jitter: f32,
    note: TrillNote,
    /// Position in the current half, 0-1
    half_position: f32,
    /// Active window as a fraction of a half
    active_length: f32,
    /// Pitch of the most recent active window
    held_pitch: f32,
    noise: NoiseSource,
    sample_rate: f32,
}

impl TrillProcessor {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            speed: ExponentialSmoother::new(5.0, SPEED_SMOOTHING_SECS, sample_rate),
            amplitude: ExponentialSmoother::new(LOWER_LEVEL, AMPLITUDE_SMOOTHING_SECS, sample_rate),
            jitter: 1.0,
            note: TrillNote::Lower,
            half_position: 0.0,
            active_length: 0.65,
            held_pitch: 1.0,
            noise: NoiseSource::new(0x51f1_5eed),
            sample_rate,
        }
    }

    /// Advance by one sample.
    ///
    /// `speed_hz` is in full cycles (lower + upper) per second.
    #[inline]
    pub fn advance(&mut self, speed_hz: f32, interval_semitones: f32, articulation: f32) {
        self.speed.set_target(speed_hz.max(0.0));
        let speed = self.speed.next_sample();

        self.phase += speed * self.jitter / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
            self.jitter = self.noise.next_range(0.9, 1.1);
        }

        let (note, position) = if self.phase < 0.5 {
            (TrillNote::Lower, self.phase * 2.0)
        } else {
            (TrillNote::Upper, self.phase * 2.0 - 1.0)
        };
        self.note = note;
        self.half_position = position;
        self.active_length = 0.35 + 0.6 * articulation.clamp(0.0, 1.0);

        let level = if self.is_active() {
            self.held_pitch = match note {
                TrillNote::Lower => 1.0,
                TrillNote::Upper => (interval_semitones / 12.0).exp2(),
            };
            match note {
                TrillNote::Lower => LOWER_LEVEL,
                TrillNote::Upper => UPPER_LEVEL,
            }
        } else {
            GAP_LEVEL
        };
        self.amplitude.set_target(level);
        self.amplitude.next_sample();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.half_position < self.active_length
    }

    /// Brightening pulse at the start of each active window.
    #[inline]
    pub fn onset(&self) -> f32 {
        if self.is_active() {
            (1.0 - 4.0 * self.half_position / self.active_length).max(0.0)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn output(&self) -> ExpressionOutput {
        ExpressionOutput {
            pitch: self.held_pitch,
            string_pitch: self.held_pitch,
            amplitude: self.amplitude.current(),
            trill_onset: self.onset(),
            ..ExpressionOutput::NEUTRAL
        }
    }

    /// A stop may begin between note pairs (the upper note's gap) or right
    /// at the start of a cycle.
    #[inline]
    pub fn can_stop(&self) -> bool {
        (self.note == TrillNote::Upper && !self.is_active()) || self.phase < STOP_WINDOW
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn note(&self) -> TrillNote {
        self.note
    }

    /// Smoothed trill speed in cycles per second.
    pub fn speed(&self) -> f32 {
        self.speed.current()
    }
}
