//! Two-group permutation test on the difference of means.
//!
//! The observed effect `|mean(a) - mean(b)|` is compared against re-groupings
//! of the pooled data. Each re-grouping is a subset of `min(|a|, |b|)` pool
//! indices; the rest of the pool forms the other group. When the number of
//! possible re-groupings fits within the iteration budget every one of them is
//! scored ([`TestMode::Exact`]); otherwise the budget is spent on uniformly
//! random re-groupings ([`TestMode::Approximate`]).
//!
//! - [`run_permutation_test`] — p-value only, OS-seeded randomness
//! - [`PermutationTest`] — builder with iteration budget and seed, returning a
//!   full [`PermutationResult`]

use permtest_core::{PermtestError, Result, Scored, Summarizable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::combinatorics::{binomial_coefficient, enumerate_all_subsets, SubsetSampler};

/// Total elementary work (trials × pool size) targeted when no iteration count
/// is requested.
pub const DEFAULT_WORK_BUDGET: usize = 30_000_000;

/// Iteration budget used when the caller does not request one:
/// `DEFAULT_WORK_BUDGET / pool_len`, never less than one.
pub fn default_iterations(pool_len: usize) -> usize {
    (DEFAULT_WORK_BUDGET / pool_len.max(1)).max(1)
}

/// Relative slack under which a re-grouping's effect still ties the observed
/// one. Absorbs the rounding difference between summing a group directly and
/// deriving it from the pool total.
pub const TIE_TOLERANCE: f64 = 1e-12;

/// How the re-groupings were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TestMode {
    /// Every possible re-grouping was scored once.
    Exact,
    /// A fixed number of independent uniform re-groupings was scored.
    Approximate,
}

impl TestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestMode::Exact => "exact",
            TestMode::Approximate => "approximate",
        }
    }
}

// ── Pool ───────────────────────────────────────────────────────────────────

/// Both groups concatenated (`a` then `b`) with their total sum cached.
#[derive(Debug, Clone)]
pub struct Pool {
    values: Vec<f64>,
    total_sum: f64,
    len_a: usize,
    subset_size: usize,
}

impl Pool {
    /// Pool `a` and `b`. The subset size is the smaller group's length.
    ///
    /// # Errors
    ///
    /// Returns an error if either group is empty.
    pub fn new(a: &[f64], b: &[f64]) -> Result<Self> {
        if a.is_empty() {
            return Err(PermtestError::InvalidInput("group_a must not be empty".into()));
        }
        if b.is_empty() {
            return Err(PermtestError::InvalidInput("group_b must not be empty".into()));
        }
        let mut values = Vec::with_capacity(a.len() + b.len());
        values.extend_from_slice(a);
        values.extend_from_slice(b);
        let total_sum = values.iter().sum();
        Ok(Self {
            values,
            total_sum,
            len_a: a.len(),
            subset_size: a.len().min(b.len()),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn total_sum(&self) -> f64 {
        self.total_sum
    }

    /// Size of every re-grouping subset, `min(|a|, |b|)`.
    pub fn subset_size(&self) -> usize {
        self.subset_size
    }

    /// Number of distinct re-groupings, `C(len, subset_size)`.
    pub fn possible_arrangements(&self) -> f64 {
        binomial_coefficient(self.len() - self.subset_size, self.subset_size)
    }

    /// Indices of the smaller original group: the subset that reproduces the
    /// original split. Ties go to `b`.
    pub fn original_subset(&self) -> Vec<usize> {
        if self.len() - self.len_a <= self.len_a {
            (self.len_a..self.len()).collect()
        } else {
            (0..self.len_a).collect()
        }
    }

    /// `|mean(a) - mean(b)|`, scored through the same running-sum path as
    /// every re-grouping so the original split ties itself exactly.
    pub fn observed_effect(&self) -> f64 {
        let (mean1, mean2) = self.partition_means(&self.original_subset());
        (mean1 - mean2).abs()
    }

    /// Sums `(outside, inside)` of the partition defined by `subset`.
    ///
    /// Only the subset is visited; the outside sum comes from the cached total.
    pub fn partition_sums(&self, subset: &[usize]) -> (f64, f64) {
        let inside: f64 = subset.iter().map(|&i| self.values[i]).sum();
        (self.total_sum - inside, inside)
    }

    /// Means `(outside, inside)` of the partition defined by `subset`.
    ///
    /// `subset` must hold `subset_size` distinct in-range indices; order is
    /// irrelevant.
    pub fn partition_means(&self, subset: &[usize]) -> (f64, f64) {
        let (sum1, sum2) = self.partition_sums(subset);
        (
            sum1 / (self.len() - subset.len()) as f64,
            sum2 / subset.len() as f64,
        )
    }
}

// ── Trial accumulator ──────────────────────────────────────────────────────

/// Running tally of scored re-groupings against a fixed observed effect.
#[derive(Debug, Clone)]
pub struct TrialAccumulator {
    observed: f64,
    n_trials: u64,
    n_bigger: u64,
    sum1: f64,
    sum2: f64,
}

impl TrialAccumulator {
    pub fn new(observed: f64) -> Self {
        Self {
            observed,
            n_trials: 0,
            n_bigger: 0,
            sum1: 0.0,
            sum2: 0.0,
        }
    }

    /// Score one re-grouping. Ties with the observed effect, up to
    /// [`TIE_TOLERANCE`], count as extreme.
    pub fn score(&mut self, pool: &Pool, subset: &[usize]) {
        let (sum1, sum2) = pool.partition_sums(subset);
        self.sum1 = sum1;
        self.sum2 = sum2;
        let mean1 = sum1 / (pool.len() - subset.len()) as f64;
        let mean2 = sum2 / subset.len() as f64;
        self.n_trials += 1;
        if (mean1 - mean2).abs() >= self.observed - self.observed.abs() * TIE_TOLERANCE {
            self.n_bigger += 1;
        }
    }

    pub fn observed(&self) -> f64 {
        self.observed
    }

    pub fn n_trials(&self) -> u64 {
        self.n_trials
    }

    pub fn n_bigger(&self) -> u64 {
        self.n_bigger
    }

    /// Sums `(outside, inside)` of the most recently scored re-grouping.
    pub fn last_sums(&self) -> (f64, f64) {
        (self.sum1, self.sum2)
    }

    /// `n_bigger / n_trials`, or NaN before any trial.
    pub fn p_value(&self) -> f64 {
        self.n_bigger as f64 / self.n_trials as f64
    }
}

// ── Result ─────────────────────────────────────────────────────────────────

/// Outcome of a permutation test.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermutationResult {
    /// `|mean(a) - mean(b)|` of the original groups.
    pub observed_effect: f64,
    /// Fraction of re-groupings at least as extreme as the observed effect.
    pub p_value: f64,
    /// Re-groupings scored.
    pub n_trials: u64,
    /// Re-groupings with an effect `>=` the observed one.
    pub n_bigger: u64,
    pub mode: TestMode,
    /// `C(|a| + |b|, min(|a|, |b|))` as a float estimate.
    pub possible_arrangements: f64,
    /// Iteration budget the mode decision was made against.
    pub iterations: usize,
}

impl Scored for PermutationResult {
    fn score(&self) -> f64 {
        self.p_value
    }
}

impl Summarizable for PermutationResult {
    fn summary(&self) -> String {
        format!(
            "Permutation test ({}): effect={:.4}, trials={}, extreme={}, p={:.6}",
            self.mode.as_str(),
            self.observed_effect,
            self.n_trials,
            self.n_bigger,
            self.p_value,
        )
    }
}

// ── Builder ────────────────────────────────────────────────────────────────

/// Permutation test configuration.
///
/// # Example
///
/// ```
/// use permtest_stats::permutation::{PermutationTest, TestMode};
///
/// let result = PermutationTest::new()
///     .iterations(1_000)
///     .seed(42)
///     .run(&[1.0, 2.0, 3.0], &[10.0, 11.0, 12.0])
///     .unwrap();
/// assert_eq!(result.mode, TestMode::Exact); // C(6, 3) = 20 <= 1000
/// assert!((result.p_value - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermutationTest {
    iterations: usize,
    seed: Option<u64>,
}

impl PermutationTest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iteration budget. Zero selects [`default_iterations`] for the pool.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Seed for approximate mode. Without one the RNG is seeded from the OS.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the test on `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if either group is empty.
    pub fn run(&self, a: &[f64], b: &[f64]) -> Result<PermutationResult> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(a, b, &mut rng)
    }

    /// Run the test drawing approximate-mode subsets from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if either group is empty.
    pub fn run_with_rng<R: Rng>(&self, a: &[f64], b: &[f64], rng: &mut R) -> Result<PermutationResult> {
        let pool = Pool::new(a, b)?;
        let observed = pool.observed_effect();
        let m = pool.subset_size();

        let iterations = if self.iterations > 0 {
            self.iterations
        } else {
            default_iterations(pool.len())
        };
        let possible = pool.possible_arrangements();
        debug!(
            pool_len = pool.len(),
            subset_size = m,
            possible,
            iterations,
            "permutation test setup"
        );

        let mut acc = TrialAccumulator::new(observed);
        let mode = if possible <= iterations as f64 {
            info!("doing exact test");
            enumerate_all_subsets(pool.len(), m, |subset| acc.score(&pool, subset))?;
            TestMode::Exact
        } else {
            if self.iterations == 0 {
                info!("using {} iterations", iterations);
            }
            let mut sampler = SubsetSampler::new(pool.len(), m)?;
            for _ in 0..iterations {
                acc.score(&pool, sampler.sample(rng));
            }
            TestMode::Approximate
        };

        Ok(PermutationResult {
            observed_effect: observed,
            p_value: acc.p_value(),
            n_trials: acc.n_trials(),
            n_bigger: acc.n_bigger(),
            mode,
            possible_arrangements: possible,
            iterations,
        })
    }
}

/// Permutation-test p-value for the difference of means of `a` and `b`.
///
/// `requested_iterations == 0` selects [`default_iterations`]. Approximate
/// mode draws from an OS-seeded RNG.
///
/// # Errors
///
/// Returns an error if either group is empty.
pub fn run_permutation_test(a: &[f64], b: &[f64], requested_iterations: usize) -> Result<f64> {
    Ok(PermutationTest::new()
        .iterations(requested_iterations)
        .run(a, b)?
        .p_value)
}

/// [`run_permutation_test`] with a caller-supplied random source.
///
/// # Errors
///
/// Returns an error if either group is empty.
pub fn run_permutation_test_with_rng<R: Rng>(
    a: &[f64],
    b: &[f64],
    requested_iterations: usize,
    rng: &mut R,
) -> Result<f64> {
    Ok(PermutationTest::new()
        .iterations(requested_iterations)
        .run_with_rng(a, b, rng)?
        .p_value)
}

// ── Tests ──────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn group(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1_000.0f64..1_000.0, 1..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn p_value_in_unit_interval(a in group(12), b in group(12), seed in any::<u64>()) {
            let result = PermutationTest::new().iterations(300).seed(seed).run(&a, &b).unwrap();
            prop_assert!((0.0..=1.0).contains(&result.p_value));
            prop_assert!(result.n_bigger <= result.n_trials);
            prop_assert!(result.n_trials >= 1);
        }

        #[test]
        fn exact_mode_symmetric_in_groups(a in group(5), b in group(5)) {
            let test = PermutationTest::new().iterations(1_000);
            let ab = test.run(&a, &b).unwrap();
            let ba = test.run(&b, &a).unwrap();
            prop_assert_eq!(ab.mode, TestMode::Exact);
            prop_assert_eq!(ab.n_trials, ba.n_trials);
            prop_assert_eq!(ab.n_bigger, ba.n_bigger);
            prop_assert_eq!(ab.p_value, ba.p_value);
        }
    }
}
