//! # Engine Module
//!
//! Orchestrates counting over a dataset.
//!
//! ## Flow
//! 1. **Scan** - find the value range (empty datasets stop here with 0)
//! 2. **Count** - run the configured counter
//! 3. **Fall back** - if the histogram is too large, switch to the sorted
//!    or brute-force counter and say so
//!
//! `cross_check` runs the histogram and brute-force counters in parallel
//! with rayon and reports whether their answers agree.

mod executor;
mod report;

pub use executor::{CounterConfig, DuplicateCounter, DuplicateCounterBuilder, Fallback};
pub use report::{CountReport, CrossCheckReport};
