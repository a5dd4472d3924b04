//! Small shared DSP helpers.

/// Rational approximation of tanh, exact at 0 and smooth up to |x| = 3.
#[inline]
pub fn soft_limit(x: f32) -> f32 {
    x * (27.0 + x * x) / (27.0 + 9.0 * x * x)
}

/// [`soft_limit`] bounded to [-1, 1].
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x < -3.0 {
        -1.0
    } else if x > 3.0 {
        1.0
    } else {
        soft_limit(x)
    }
}

/// Band-limited step correction for the sample containing a discontinuity.
///
/// `t` is the fraction of the sample period elapsed since the step.
#[inline]
pub fn this_blep_sample(t: f32) -> f32 {
    0.5 * t * t
}

/// Band-limited step correction for the sample after a discontinuity.
#[inline]
pub fn next_blep_sample(t: f32) -> f32 {
    let t = 1.0 - t;
    -0.5 * t * t
}
