//! Smoothers used by the voice.
//!
//! - [`LinearGlide`]: fixed-length straight-line glide (fundamental changes).
//! - [`ExponentialSmoother`]: one-pole lowpass toward a target (mix levels,
//!   trill speed and amplitude).
//! - [`slew`]: fixed-rate convergence (bow envelope).
//!
//! # Example
//!
//! ```
//! use arco_core::LinearGlide;
//!
//! // A fifth up over 5ms at 44.1kHz
//! let mut fundamental = LinearGlide::new(220.0, 0.005, 44100.0);
//! fundamental.glide_to(330.0);
//!
//! for _ in 0..300 {
//!     fundamental.next_sample();
//! }
//! assert_eq!(fundamental.current(), 330.0);
//! ```

/// Straight-line glide between frequencies.
///
/// Every glide takes the same number of samples regardless of distance, so
/// a retarget mid-glide restarts from wherever the value is. The value is
/// derived from the samples left rather than accumulated, so it lands on the
/// target exactly.
#[derive(Debug, Clone)]
pub struct LinearGlide {
    target: f32,
    /// Distance covered per sample, signed
    slope: f32,
    remaining: u32,
    length: u32,
}

impl LinearGlide {
    pub fn new(initial: f32, glide_secs: f32, sample_rate: f32) -> Self {
        Self {
            target: initial,
            slope: 0.0,
            remaining: 0,
            length: (glide_secs * sample_rate).round().max(1.0) as u32,
        }
    }

    /// Start gliding from the present value. Re-requesting the current
    /// target does not restart the glide.
    #[inline]
    pub fn glide_to(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        let from = self.current();
        self.target = target;
        self.remaining = self.length;
        self.slope = (target - from) / self.length as f32;
    }

    /// Skip the glide.
    #[inline]
    pub fn jump_to(&mut self, value: f32) {
        self.target = value;
        self.remaining = 0;
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.current()
    }

    #[inline]
    pub fn current(&self) -> f32 {
        if self.remaining == 0 {
            self.target
        } else {
            self.target - self.slope * self.remaining as f32
        }
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_gliding(&self) -> bool {
        self.remaining > 0
    }
}

/// One-pole exponential smoother.
///
/// Moves a fixed fraction of the remaining distance each sample. After
/// `4.6 × time_constant` the value is within 1% of the target.
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    current: f32,
    target: f32,
    coefficient: f32,
}

impl ExponentialSmoother {
    pub fn new(initial: f32, time_constant_secs: f32, sample_rate: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coefficient: one_pole_coefficient(time_constant_secs, sample_rate),
        }
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.coefficient;
        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }
}

/// Per-sample coefficient of a one-pole lowpass with the given time constant.
#[inline]
pub fn one_pole_coefficient(time_constant_secs: f32, sample_rate: f32) -> f32 {
    let samples = (time_constant_secs * sample_rate).max(1.0);
    1.0 - (-1.0 / samples).exp()
}

/// Move `current` toward `target` by at most `max_delta`.
#[inline]
pub fn slew(current: f32, target: f32, max_delta: f32) -> f32 {
    let error = target - current;
    current + error.clamp(-max_delta, max_delta)
}
