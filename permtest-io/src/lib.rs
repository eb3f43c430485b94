//! Number ingestion for permtest.
//!
//! Reads whitespace-delimited real numbers from strings, readers, files, or
//! standard input. See [`numbers`].

pub mod numbers;

pub use numbers::{parse_numbers_str, read_numbers, read_numbers_path, read_numbers_paths};
