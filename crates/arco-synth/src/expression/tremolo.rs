//! Bowed tremolo: rapid alternating down/up strokes.
//!
//! One cycle is a down stroke followed by an up stroke. Each stroke has an
//! active part, where the bow speed swells and falls, and a short gap where
//! the bow turns around and the level dips. Cycle length jitters a little and
//! every third or fourth stroke is accented.

use super::ExpressionOutput;
use arco_dsp::NoiseSource;
use std::f32::consts::PI;

/// Level floor while the bow is slow or turning.
pub const GAP_LEVEL: f32 = 0.3;

const ACCENT_GAIN: f32 = 1.25;
const MAX_SCRATCH: f32 = 0.4;
const MAX_DARKENING: f32 = 0.3;
/// Fraction of a stroke at its start where a stop is allowed.
const STOP_WINDOW: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeDirection {
    Down,
    Up,
}

#[derive(Debug, Clone)]
pub struct TremoloProcessor {
    /// Position in the down+up cycle, 0-1, never reset
    phase: f32,
    /// Tempo factor of the current cycle
    jitter: f32,
    direction: StrokeDirection,
    /// Strokes until the next accent
    strokes_to_accent: u32,
    accented: bool,
    /// Position in the current stroke, 0-1
    stroke_position: f32,
    articulation: f32,
    noise: NoiseSource,
    sample_rate: f32,
}

impl TremoloProcessor {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            jitter: 1.0,
            direction: StrokeDirection::Down,
            strokes_to_accent: 3,
            accented: false,
            stroke_position: 0.0,
            articulation: 0.5,
            noise: NoiseSource::new(0x7e3a_51c9),
            sample_rate,
        }
    }

    /// Advance by one sample at `strokes_per_second`.
    #[inline]
    pub fn advance(&mut self, strokes_per_second: f32, articulation: f32) {
        self.articulation = articulation.clamp(0.0, 1.0);

        let cycles_per_second = strokes_per_second.max(0.0) * 0.5 * self.jitter;
        self.phase += cycles_per_second / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
            self.jitter = self.noise.next_range(0.85, 1.15);
        }

        let direction = if self.phase < 0.5 {
            StrokeDirection::Down
        } else {
            StrokeDirection::Up
        };
        if direction != self.direction {
            self.direction = direction;
            self.begin_stroke();
        }
        self.stroke_position = if self.phase < 0.5 {
            self.phase * 2.0
        } else {
            self.phase * 2.0 - 1.0
        };
    }

    fn begin_stroke(&mut self) {
        self.strokes_to_accent = self.strokes_to_accent.saturating_sub(1);
        self.accented = self.strokes_to_accent == 0;
        if self.accented {
            self.strokes_to_accent = if self.noise.next_u32() & 1 == 0 { 3 } else { 4 };
        }
    }

    /// Fraction of each stroke during which the bow is moving.
    #[inline]
    pub fn active_length(&self) -> f32 {
        0.3 + 0.68 * self.articulation
    }

    #[inline]
    pub fn in_gap(&self) -> bool {
        self.stroke_position >= self.active_length()
    }

    #[inline]
    pub fn output(&self) -> ExpressionOutput {
        let active = self.active_length();
        if self.stroke_position < active {
            let p = self.stroke_position / active;
            let speed = (p * PI).sin().max(0.0).powf(2.5);
            let accent = if self.accented { ACCENT_GAIN } else { 1.0 };
            let slow = 1.0 - speed;
            ExpressionOutput {
                amplitude: GAP_LEVEL + (1.0 - GAP_LEVEL) * speed * accent,
                noise_boost: MAX_SCRATCH * slow * slow,
                darkening: MAX_DARKENING * slow,
                bow_speed: speed,
                ..ExpressionOutput::NEUTRAL
            }
        } else {
            let g = (self.stroke_position - active) / (1.0 - active);
            ExpressionOutput {
                amplitude: GAP_LEVEL * (1.0 - 0.5 * (PI * g).sin()),
                noise_boost: MAX_SCRATCH,
                darkening: MAX_DARKENING,
                bow_speed: 0.0,
                ..ExpressionOutput::NEUTRAL
            }
        }
    }

    /// A stop may begin while the bow turns or right after a new stroke starts.
    #[inline]
    pub fn can_stop(&self) -> bool {
        self.in_gap() || self.stroke_position < STOP_WINDOW
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn direction(&self) -> StrokeDirection {
        self.direction
    }

    pub fn is_accented(&self) -> bool {
        self.accented
    }
}
