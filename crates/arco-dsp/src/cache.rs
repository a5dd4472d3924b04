//! Change detection for coefficient recomputation.

/// Remembers the key the coefficients were last computed for.
///
/// Lets a stage skip its (trigonometric) coefficient recomputation when the
/// settings that drive it have not changed since the previous block.
#[derive(Debug, Clone)]
pub struct CoefficientCache<K> {
    key: Option<K>,
    recomputes: u64,
}

impl<K> Default for CoefficientCache<K> {
    fn default() -> Self {
        Self {
            key: None,
            recomputes: 0,
        }
    }
}

impl<K: PartialEq + Copy> CoefficientCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` (and records `key`) when `key` differs from the cached one.
    #[inline]
    pub fn needs_update(&mut self, key: K) -> bool {
        if self.key == Some(key) {
            return false;
        }
        self.key = Some(key);
        self.recomputes += 1;
        true
    }

    /// Forget the cached key; the next check reports a change.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn key(&self) -> Option<K> {
        self.key
    }

    /// How many times a change was reported.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}
