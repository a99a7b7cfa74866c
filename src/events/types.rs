//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};

/// All events emitted by the counting engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Events from a single counting run
    Count(CountEvent),
    /// Events from a histogram vs brute-force cross-check
    CrossCheck(CrossCheckEvent),
}

/// Which counter produced a result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// O(n) counting array sized to the value range
    #[default]
    Histogram,
    /// O(n²) pairwise comparison
    BruteForce,
    /// O(n log n) sort and adjacent comparison
    Sorted,
}

/// Progress of a long-running count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Percentage of outer iterations completed (0-100)
    pub percent_complete: u8,
}

/// Events during a counting run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CountEvent {
    /// Counting has started
    Started { strategy: Strategy, total: usize },
    /// Progress update, only emitted by the brute-force counter
    Progress(ProgressEvent),
    /// The requested counter could not run and another took over
    FallbackUsed {
        from: Strategy,
        to: Strategy,
        reason: String,
    },
    /// Counting completed
    Completed {
        strategy: Strategy,
        duplicates: usize,
        duration_ms: u64,
    },
    /// Counting was cancelled
    Cancelled,
}

/// Events during a cross-check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CrossCheckEvent {
    /// Cross-check has started
    Started { total: usize },
    /// Both counters finished
    Completed {
        histogram: usize,
        brute_force: usize,
        agrees: bool,
    },
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Histogram => write!(f, "Histogram"),
            Strategy::BruteForce => write!(f, "Brute force"),
            Strategy::Sorted => write!(f, "Sorted"),
        }
    }
}
