use std::collections::hash_map::DefaultHasher;
use std::f64::consts::LN_2;
use std::hash::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::{
    error::{Result, SolverError},
    solver::{
        filter::StateFilter,
        funnel::{Funnel, PrimitiveSink},
        state::PuzzleState,
    },
};

// Distinct seeds so the two per-state hashes are independent.
const SEED_ONE: u64 = 0x9e37_79b9_7f4a_7c15;
const SEED_TWO: u64 = 0xc2b2_ae3d_27d4_eb4f;

/// A [`StateFilter`] with approximate containment, backed by a Bloom
/// filter over the state type's [`Funnel`] encoding.
///
/// The filter is a fixed-size bit array addressed by `k` hash positions per
/// state, derived from two seeded 64-bit hashes of the funneled bytes
/// combined by double hashing. `put` may claim an unseen state was already
/// seen (a false positive), which is how a search configured with this
/// filter can skip a legitimate unexplored state — the accepted trade-off
/// for a hard memory bound. A state that was put is always reported as
/// contained; there are no false negatives.
///
/// The filter never shrinks and never removes entries: its false-positive
/// rate rises monotonically as insertions exceed the sizing hint. That is
/// documented degradation, not an error.
pub struct BloomStateFilter<T: PuzzleState> {
    funnel: Arc<dyn Funnel<T>>,
    words: Vec<AtomicU64>,
    num_bits: u64,
    num_hashes: u32,
    bits_set: AtomicU64,
}

impl<T: PuzzleState> BloomStateFilter<T> {
    /// Creates a filter sized for `expected_insertions` distinct states at
    /// the target false-positive probability `fpp`.
    ///
    /// Fails with [`SolverError::InvalidExpectedInsertions`] when the hint
    /// is zero and [`SolverError::InvalidFalsePositiveProbability`] when
    /// `fpp` is outside the open interval (0, 1).
    pub fn new(funnel: Arc<dyn Funnel<T>>, expected_insertions: u64, fpp: f64) -> Result<Self> {
        if expected_insertions == 0 {
            return Err(SolverError::InvalidExpectedInsertions(expected_insertions).into());
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(SolverError::InvalidFalsePositiveProbability(fpp).into());
        }

        let num_bits = optimal_num_bits(expected_insertions, fpp);
        let num_hashes = optimal_num_hashes(expected_insertions, num_bits);
        let num_words = (num_bits + 63) / 64;

        Ok(Self {
            funnel,
            words: (0..num_words).map(|_| AtomicU64::new(0)).collect(),
            num_bits,
            num_hashes,
            bits_set: AtomicU64::new(0),
        })
    }

    fn seeded_hash(&self, state: &T, seed: u64) -> u64 {
        let mut hasher = DefaultHasher::new();
        hasher.write_u64(seed);
        let mut sink = HasherSink(&mut hasher);
        self.funnel.fill(state, &mut sink);
        hasher.finish()
    }

    /// The k bit positions for a state: `h1 + i * h2 mod m`.
    fn bit_indexes(&self, state: &T) -> impl Iterator<Item = u64> {
        let h1 = self.seeded_hash(state, SEED_ONE);
        let h2 = self.seeded_hash(state, SEED_TWO);
        let num_bits = self.num_bits;
        (0..self.num_hashes as u64).map(move |i| h1.wrapping_add(i.wrapping_mul(h2)) % num_bits)
    }

    /// Sets the bit, returning true if it was previously unset.
    fn set_bit(&self, index: u64) -> bool {
        let mask = 1u64 << (index % 64);
        let old = self.words[(index / 64) as usize].fetch_or(mask, Ordering::Relaxed);
        old & mask == 0
    }

    fn get_bit(&self, index: u64) -> bool {
        let mask = 1u64 << (index % 64);
        self.words[(index / 64) as usize].load(Ordering::Relaxed) & mask != 0
    }
}

impl<T: PuzzleState> StateFilter<T> for BloomStateFilter<T> {
    fn might_contain(&self, state: &T) -> bool {
        self.bit_indexes(state).all(|index| self.get_bit(index))
    }

    fn put(&self, state: &T) -> bool {
        let mut newly_set = 0;
        for index in self.bit_indexes(state) {
            if self.set_bit(index) {
                newly_set += 1;
            }
        }
        if newly_set > 0 {
            self.bits_set.fetch_add(newly_set, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    fn approximate_element_count(&self) -> u64 {
        // Fill-ratio estimator: n ≈ -m/k * ln(1 - x/m), x = set bits.
        let m = self.num_bits as f64;
        let k = self.num_hashes as f64;
        let x = self.bits_set.load(Ordering::Relaxed) as f64;
        (-(m / k) * (1.0 - x / m).ln()).round() as u64
    }

    fn expected_fpp(&self) -> f64 {
        let fill = self.bits_set.load(Ordering::Relaxed) as f64 / self.num_bits as f64;
        fill.powi(self.num_hashes as i32)
    }
}

/// `m = ceil(-n * ln(p) / ln(2)^2)`, floored at one word.
fn optimal_num_bits(expected_insertions: u64, fpp: f64) -> u64 {
    let bits = (-(expected_insertions as f64) * fpp.ln() / (LN_2 * LN_2)).ceil();
    (bits as u64).max(64)
}

/// `k = round(m / n * ln(2))`, at least one.
fn optimal_num_hashes(expected_insertions: u64, num_bits: u64) -> u32 {
    let k = (num_bits as f64 / expected_insertions as f64 * LN_2).round();
    (k as u32).max(1)
}

struct HasherSink<'a>(&'a mut DefaultHasher);

impl PrimitiveSink for HasherSink<'_> {
    fn put_u8(&mut self, value: u8) {
        self.0.write_u8(value);
    }
    fn put_u32(&mut self, value: u32) {
        self.0.write_u32(value);
    }
    fn put_u64(&mut self, value: u64) {
        self.0.write_u64(value);
    }
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.0.write(bytes);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::error::Error;

    // --- Test Setup ---

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Key(u64);

    impl PuzzleState for Key {
        fn is_solution(&self) -> bool {
            false
        }
        fn successors(&self) -> Box<dyn Iterator<Item = Self> + Send + '_> {
            Box::new(std::iter::empty())
        }
    }

    fn key_funnel() -> Arc<dyn Funnel<Key>> {
        Arc::new(|key: &Key, sink: &mut dyn PrimitiveSink| sink.put_u64(key.0))
    }

    fn inner(error: Error) -> SolverError {
        let Error::Inner { inner, .. } = error;
        *inner
    }

    // --- Tests ---

    #[test]
    fn zero_expected_insertions_is_a_configuration_error() {
        let result = BloomStateFilter::new(key_funnel(), 0, 0.01);
        assert!(matches!(
            inner(result.err().unwrap()),
            SolverError::InvalidExpectedInsertions(0)
        ));
    }

    #[test]
    fn fpp_outside_unit_interval_is_a_configuration_error() {
        for fpp in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            let result = BloomStateFilter::new(key_funnel(), 100, fpp);
            assert!(matches!(
                inner(result.err().unwrap()),
                SolverError::InvalidFalsePositiveProbability(_)
            ));
        }
    }

    #[test]
    fn fresh_state_is_definitely_new() {
        let filter = BloomStateFilter::new(key_funnel(), 100, 0.01).unwrap();
        assert!(!filter.might_contain(&Key(7)));
        assert!(filter.put(&Key(7)));
        assert!(filter.might_contain(&Key(7)));
    }

    #[test]
    fn repeated_put_returns_false() {
        let filter = BloomStateFilter::new(key_funnel(), 100, 0.01).unwrap();
        assert!(filter.put(&Key(7)));
        assert!(!filter.put(&Key(7)));
    }

    #[test]
    fn element_count_estimate_tracks_distinct_insertions() {
        let filter = BloomStateFilter::new(key_funnel(), 1_000, 0.03).unwrap();
        for n in 0..500u64 {
            filter.put(&Key(n));
        }

        let estimate = filter.approximate_element_count() as f64;
        assert!(
            (350.0..=650.0).contains(&estimate),
            "estimate {estimate} too far from 500"
        );
    }

    #[test]
    fn overload_degrades_without_crashing() {
        // Sized for ten insertions, loaded with a thousand.
        let filter = BloomStateFilter::new(key_funnel(), 10, 0.01).unwrap();

        let mut last_fpp = filter.expected_fpp();
        for n in 0..1_000u64 {
            filter.put(&Key(n));
            if n % 100 == 99 {
                let fpp = filter.expected_fpp();
                assert!(fpp >= last_fpp, "fpp decreased under load");
                last_fpp = fpp;
            }
        }

        assert!(last_fpp > 0.5, "an overloaded filter should be near-saturated");
        for n in 0..1_000u64 {
            assert!(filter.might_contain(&Key(n)));
        }
    }

    #[test]
    fn no_false_negatives_under_concurrent_puts() {
        let filter = BloomStateFilter::new(key_funnel(), 10_000, 0.01).unwrap();

        std::thread::scope(|scope| {
            for chunk in 0..8u64 {
                let filter = &filter;
                scope.spawn(move || {
                    for n in (chunk * 1_000)..((chunk + 1) * 1_000) {
                        filter.put(&Key(n));
                    }
                });
            }
        });

        for n in 0..8_000u64 {
            assert!(filter.might_contain(&Key(n)));
        }
    }

    #[test]
    fn false_positive_rate_stays_near_target() {
        let filter = BloomStateFilter::new(key_funnel(), 10_000, 0.03).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            filter.put(&Key(rng.gen_range(0..u64::MAX / 2)));
        }

        // Probe states from a disjoint range; the observed false-positive
        // rate should be the same order of magnitude as the target.
        let mut false_positives = 0;
        for _ in 0..10_000 {
            if filter.might_contain(&Key(rng.gen_range(u64::MAX / 2..u64::MAX))) {
                false_positives += 1;
            }
        }
        assert!(
            false_positives < 1_000,
            "observed {false_positives} false positives in 10k probes at a 3% target"
        );
    }

    proptest! {
        #[test]
        fn put_states_are_always_contained(values in proptest::collection::vec(any::<u64>(), 1..400)) {
            let filter = BloomStateFilter::new(key_funnel(), 100, 0.01).unwrap();
            for v in &values {
                filter.put(&Key(*v));
            }
            for v in &values {
                prop_assert!(filter.might_contain(&Key(*v)));
            }
        }
    }
}
