//! Single-value summaries of a numeric sample.
//!
//! Provides [`mean`], [`median`], and [`mode`], plus [`summarize`] which
//! dispatches on a [`Statistic`] chosen at runtime.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use permtest_core::{PermtestError, Result};

/// Which summary [`summarize`] computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statistic {
    Mean,
    Median,
    Mode,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Mode => "mode",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = PermtestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            "mode" => Ok(Statistic::Mode),
            other => Err(PermtestError::InvalidInput(format!(
                "unknown statistic '{}' (expected mean, median, or mode)",
                other
            ))),
        }
    }
}

/// Compute `stat` over `data`.
///
/// # Errors
///
/// Returns an error if `data` is empty.
pub fn summarize(data: &[f64], stat: Statistic) -> Result<f64> {
    match stat {
        Statistic::Mean => mean(data),
        Statistic::Median => median(data),
        Statistic::Mode => mode(data),
    }
}

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(PermtestError::InvalidInput(
            "mean: data must not be empty".into(),
        ));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Median: the central value for odd lengths, the average of the two central
/// values for even lengths.
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(PermtestError::InvalidInput(
            "median: data must not be empty".into(),
        ));
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let (lo, hi) = ((n - 1) / 2, n / 2);
    Ok(0.5 * sorted[lo] + 0.5 * sorted[hi])
}

/// Most frequent value.
///
/// Ties go to whichever value first reached the winning count in a single
/// left-to-right scan.
pub fn mode(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(PermtestError::InvalidInput(
            "mode: data must not be empty".into(),
        ));
    }
    let mut counts: HashMap<u64, usize> = HashMap::new();
    let mut best = data[0];
    let mut best_count = 0usize;
    for &x in data {
        // -0.0 and 0.0 share a bucket
        let key = if x == 0.0 { 0u64 } else { x.to_bits() };
        let count = counts.entry(key).or_insert(0);
        *count += 1;
        if *count > best_count {
            best = x;
            best_count = *count;
        }
    }
    Ok(best)
}

// ── Tests ──────────────────────────────────────────────────────────────────
