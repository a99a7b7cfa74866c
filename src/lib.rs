//! # Duplicate Value Counter
//!
//! Counts how many elements of an integer dataset repeat an earlier value.
//!
//! ## Counters
//! - **Histogram** - one pass over a counting array sized to the value
//!   range. O(n) time, O(range) memory, bounded by a configurable ceiling.
//! - **Brute force** - compares every pair. O(n²), no extra memory, reports
//!   progress and can be cancelled. Used to cross-check the histogram.
//! - **Sorted** - sorts a copy. O(n log n), used when the range is too wide.
//!
//! The engine never removes values; it only counts them.
//!
//! ## Architecture
//! - `core` - The counters and the engine that picks between them
//! - `events` - Event-driven progress reporting
//! - `dataset` - Loading and generating datasets
//! - `error` - Error types

pub mod core;
pub mod dataset;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::{
    count_duplicates_brute_force, count_duplicates_histogram, count_duplicates_sorted,
    scan_range, ValueRange,
};
pub use error::{CountError, DuplicateCounterError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. Filtering follows
/// `RUST_LOG`.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
