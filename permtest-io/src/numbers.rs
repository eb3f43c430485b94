//! Whitespace-delimited number lists.
//!
//! Any run of whitespace (spaces, tabs, newlines) separates tokens, and every
//! token must parse as an `f64`. There are no comments or headers.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use permtest_core::{PermtestError, Result};
use tracing::debug;

/// Parse every whitespace-separated token in `data`.
///
/// # Errors
///
/// Returns an error naming the line and token of the first value that is not
/// a real number.
///
/// # Examples
///
/// ```
/// # use permtest_io::numbers::parse_numbers_str;
/// let nums = parse_numbers_str("1 2.5\n-3e2\t4\n").unwrap();
/// assert_eq!(nums, vec![1.0, 2.5, -300.0, 4.0]);
/// ```
pub fn parse_numbers_str(data: &str) -> Result<Vec<f64>> {
    let mut nums = Vec::new();
    for (line_idx, line) in data.lines().enumerate() {
        parse_line(line, line_idx + 1, "<string>", &mut nums)?;
    }
    Ok(nums)
}

/// Read numbers from `reader`. `source` labels error messages.
///
/// # Errors
///
/// Returns [`PermtestError::Io`] if reading fails and [`PermtestError::Parse`]
/// on the first malformed token.
pub fn read_numbers<R: BufRead>(reader: R, source: &str) -> Result<Vec<f64>> {
    let mut nums = Vec::new();
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            PermtestError::Io(io::Error::new(e.kind(), format!("{}: {}", source, e)))
        })?;
        parse_line(&line, line_idx + 1, source, &mut nums)?;
    }
    Ok(nums)
}

/// Read numbers from the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or contains a
/// malformed token.
pub fn read_numbers_path(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        PermtestError::Io(io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    let nums = read_numbers(BufReader::new(file), &path.display().to_string())?;
    debug!(path = %path.display(), count = nums.len(), "read numbers");
    Ok(nums)
}

/// Read and concatenate numbers from every file in `paths`, in order.
///
/// An empty `paths` reads standard input instead.
///
/// # Errors
///
/// Fails on the first source that cannot be read or parsed.
pub fn read_numbers_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<f64>> {
    if paths.is_empty() {
        let stdin = io::stdin();
        return read_numbers(stdin.lock(), "<stdin>");
    }
    let mut nums = Vec::new();
    for path in paths {
        nums.extend(read_numbers_path(path)?);
    }
    Ok(nums)
}

fn parse_line(line: &str, line_no: usize, source: &str, out: &mut Vec<f64>) -> Result<()> {
    for (token_idx, token) in line.split_whitespace().enumerate() {
        let value: f64 = token.parse().map_err(|_| {
            PermtestError::Parse(format!(
                "{}: line {}, token {}: invalid number '{}'",
                source,
                line_no,
                token_idx + 1,
                token
            ))
        })?;
        out.push(value);
    }
    Ok(())
}
