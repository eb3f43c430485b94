//! Combinatorics for permutation testing.
//!
//! Provides the arrangement count used to choose between exact and sampled
//! testing ([`binomial_coefficient`], [`ln_binomial_coefficient`]), exhaustive
//! lexicographic subset enumeration ([`enumerate_all_subsets`]), and uniform
//! random subset sampling via Floyd's algorithm ([`SubsetSampler`],
//! [`sample_one_subset`]).

use std::collections::HashSet;

use permtest_core::{PermtestError, Result};
use rand::Rng;

/// Number of ways to choose `m` items from `n + m`, i.e. `(n + m)! / (n! m!)`.
///
/// Computed as a running product anchored at `max(n, m)`, so the loop runs
/// only `min(n, m)` times and never forms a factorial. Each intermediate value
/// is itself a binomial coefficient, so the result is exact while it fits in
/// the 53-bit mantissa and a close approximation beyond that.
///
/// # Example
///
/// ```
/// use permtest_stats::combinatorics::binomial_coefficient;
///
/// assert_eq!(binomial_coefficient(3, 3), 20.0); // C(6, 3)
/// assert_eq!(binomial_coefficient(0, 0), 1.0);
/// ```
pub fn binomial_coefficient(n: usize, m: usize) -> f64 {
    let (big, small) = if n > m { (n, m) } else { (m, n) };
    let mut result = 1.0_f64;
    for k in 1..=small {
        result = result * (big + k) as f64 / k as f64;
    }
    result
}

/// Natural log of [`binomial_coefficient`]`(n, m)`.
///
/// Stays finite where the direct product overflows to infinity, so budgets can
/// be compared as `ln_binomial_coefficient(n, m) <= (budget as f64).ln()`.
pub fn ln_binomial_coefficient(n: usize, m: usize) -> f64 {
    let (big, small) = if n > m { (n, m) } else { (m, n) };
    (1..=small)
        .map(|k| ((big + k) as f64).ln() - (k as f64).ln())
        .sum()
}

fn check_sizes(universe_size: usize, subset_size: usize) -> Result<()> {
    if subset_size > universe_size {
        return Err(PermtestError::InvalidInput(format!(
            "subset size ({}) exceeds universe size ({})",
            subset_size, universe_size
        )));
    }
    Ok(())
}

/// Call `emit` once for every `subset_size`-element subset of `[0, universe_size)`.
///
/// Subsets arrive as strictly increasing index slices in lexicographic order,
/// `C(universe_size, subset_size)` calls in total. The slice is a single
/// buffer rewritten in place between calls, so `emit` must copy anything it
/// wants to keep. A `subset_size` of zero emits the empty subset once.
///
/// # Errors
///
/// Returns an error if `subset_size > universe_size`.
///
/// # Example
///
/// ```
/// use permtest_stats::combinatorics::enumerate_all_subsets;
///
/// let mut seen = Vec::new();
/// enumerate_all_subsets(4, 2, |s| seen.push(s.to_vec())).unwrap();
/// assert_eq!(seen.len(), 6); // C(4, 2)
/// assert_eq!(seen[0], vec![0, 1]);
/// assert_eq!(seen[5], vec![2, 3]);
/// ```
pub fn enumerate_all_subsets<F>(universe_size: usize, subset_size: usize, mut emit: F) -> Result<()>
where
    F: FnMut(&[usize]),
{
    check_sizes(universe_size, subset_size)?;
    let mut buf = vec![0usize; subset_size];
    fill_position(&mut buf, 0, 0, universe_size, &mut emit);
    Ok(())
}

/// Choose every admissible index for `pos`, then recurse into `pos + 1`.
///
/// Position `pos` ranges over `[next, universe_size - (len - pos)]`; the upper
/// bound leaves room for the positions still to be filled.
fn fill_position<F>(buf: &mut [usize], pos: usize, next: usize, universe_size: usize, emit: &mut F)
where
    F: FnMut(&[usize]),
{
    if pos == buf.len() {
        emit(buf);
        return;
    }
    let last_choice = universe_size - (buf.len() - pos);
    for j in next..=last_choice {
        buf[pos] = j;
        fill_position(buf, pos + 1, j + 1, universe_size, emit);
    }
}

/// Reusable uniform sampler of `subset_size`-element subsets of `[0, universe_size)`.
///
/// Uses Floyd's algorithm: for `j` from `universe_size - subset_size` to
/// `universe_size - 1`, draw `t` uniformly from `[0, j]` and take `t` unless it
/// was already taken, in which case take `j`. Every subset is equally likely
/// and each draw costs `subset_size` random numbers with no rejection.
///
/// Samples are in insertion order, not sorted.
#[derive(Debug, Clone)]
pub struct SubsetSampler {
    universe_size: usize,
    subset_size: usize,
    seen: HashSet<usize>,
    buf: Vec<usize>,
}

impl SubsetSampler {
    /// # Errors
    ///
    /// Returns an error if `subset_size > universe_size`.
    pub fn new(universe_size: usize, subset_size: usize) -> Result<Self> {
        check_sizes(universe_size, subset_size)?;
        Ok(Self {
            universe_size,
            subset_size,
            seen: HashSet::with_capacity(subset_size),
            buf: Vec::with_capacity(subset_size),
        })
    }

    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    pub fn subset_size(&self) -> usize {
        self.subset_size
    }

    /// Draw one subset. The returned slice is overwritten by the next draw.
    pub fn sample<R: Rng>(&mut self, rng: &mut R) -> &[usize] {
        self.seen.clear();
        self.buf.clear();
        for j in (self.universe_size - self.subset_size)..self.universe_size {
            let t = rng.random_range(0..=j);
            let x = if self.seen.contains(&t) { j } else { t };
            self.seen.insert(x);
            self.buf.push(x);
        }
        &self.buf
    }
}

/// Draw a single uniformly random subset and pass it to `emit`.
///
/// One-shot form of [`SubsetSampler::sample`]; loops drawing many subsets
/// should hold a [`SubsetSampler`] instead.
///
/// # Errors
///
/// Returns an error if `subset_size > universe_size`.
///
/// # Example
///
/// ```
/// use permtest_stats::combinatorics::sample_one_subset;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut drawn = Vec::new();
/// sample_one_subset(10, 4, &mut rng, |s| drawn = s.to_vec()).unwrap();
/// assert_eq!(drawn.len(), 4);
/// assert!(drawn.iter().all(|&i| i < 10));
/// ```
pub fn sample_one_subset<R, F>(
    universe_size: usize,
    subset_size: usize,
    rng: &mut R,
    emit: F,
) -> Result<()>
where
    R: Rng,
    F: FnOnce(&[usize]),
{
    let mut sampler = SubsetSampler::new(universe_size, subset_size)?;
    emit(sampler.sample(rng));
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────
