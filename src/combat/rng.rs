//! Seeded randomness for the attrition simulator. [Rng] is SplitMix64: fast, deterministic,
//! not cryptographically secure. Anything implementing [RandomSource] can drive a battle.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// Source of uniform randomness threaded explicitly through a simulation run.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    fn index_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "index_below requires a non-empty range");
        ((u128::from(self.next_u64()) * bound as u128) >> 64) as usize
    }

    /// Uniform integer in `low..=high`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let span = (high - low) as usize + 1;
        low + self.index_below(span) as u32
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from OS entropy; falls back to a fixed seed if entropy is unavailable.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }
}

impl RandomSource for Rng {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }
}

pub fn entropy_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(err) => {
            tracing::warn!("entropy unavailable ({err}); using fixed seed");
            SPLITMIX64_GOLDEN
        }
    }
}
