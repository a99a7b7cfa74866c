//! # Core Module
//!
//! The front-end-agnostic counting engine.
//!
//! ## Modules
//! - `range` - Finds the value range of a dataset
//! - `histogram` - O(n) counting with an array sized to the range
//! - `brute_force` - O(n²) pairwise baseline with progress
//! - `sorted` - O(n log n) fallback for ranges too wide to allocate
//! - `progress` - Progress sinks and cancellation
//! - `engine` - Configuration, fallback and cross-checking

pub mod brute_force;
pub mod engine;
pub mod histogram;
pub mod progress;
pub mod range;
pub mod sorted;

// Re-export commonly used types
pub use brute_force::{count_duplicates_brute_force, BruteForceCounter, MatchPolicy};
pub use engine::{CountReport, CrossCheckReport, DuplicateCounter, Fallback};
pub use histogram::{
    count_duplicates_histogram, DuplicateTally, HistogramConfig, HistogramCounter,
    DEFAULT_MAX_SLOTS,
};
pub use progress::{CancellationToken, NoProgress, ProgressSink};
pub use range::{scan_range, Sample, ValueRange};
pub use sorted::count_duplicates_sorted;
