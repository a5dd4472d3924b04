//! Deterministic white noise.

const DEFAULT_SEED: u32 = 0x1234_5678;

/// xorshift32 white noise in [-1, 1].
///
/// Same seed, same sequence. A zero seed would lock the generator at zero, so
/// it is replaced by the default seed.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    state: u32,
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl NoiseSource {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform in [0, 1].
    #[inline]
    pub fn next_unipolar(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Uniform in [-1, 1].
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.next_unipolar() * 2.0 - 1.0
    }

    /// Uniform in [lo, hi].
    #[inline]
    pub fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_unipolar()
    }
}
