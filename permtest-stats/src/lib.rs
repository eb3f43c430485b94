//! Permutation testing for the difference of two group means.
//!
//! - **Combinatorics** — arrangement counts, lexicographic subset enumeration,
//!   Floyd subset sampling
//! - **Permutation test** — exact or sampled p-value for `|mean(a) - mean(b)|`
//! - **Descriptive statistics** — mean, median, mode

pub mod combinatorics;
pub mod descriptive;
pub mod permutation;

pub use permutation::{
    run_permutation_test, run_permutation_test_with_rng, PermutationResult, PermutationTest,
    TestMode,
};
