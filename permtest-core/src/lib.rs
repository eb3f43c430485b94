//! Shared primitives for the permtest workspace.
//!
//! - **Error types** — [`PermtestError`] and [`Result`] for structured error handling
//! - **Traits** — [`Scored`] and [`Summarizable`], implemented by test results

pub mod error;
pub mod traits;

pub use error::{PermtestError, Result};
pub use traits::*;
