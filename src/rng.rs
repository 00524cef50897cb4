use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A seedable pseudo-random source threaded explicitly through a search run
/// (spec §5 "Ordering guarantees"). Never global/thread-local: two runs
/// constructed from the same seed and fed the same input always resolve
/// equally-weighted successor shuffles identically.
#[derive(Debug, Clone)]
pub struct SearchRng {
    inner: SmallRng,
}

impl SearchRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Deterministically shuffles `items` in place using a Fisher-Yates
    /// pass driven by this source.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        use rand::Rng;
        for i in (1..items.len()).rev() {
            let j = self.inner.random_range(0..=i);
            items.swap(i, j);
        }
    }

    pub fn next_u64(&mut self, range: std::ops::Range<u64>) -> u64 {
        use rand::Rng;
        self.inner.random_range(range)
    }
}
