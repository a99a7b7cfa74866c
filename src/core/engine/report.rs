//! Results returned by the counting engine.

use crate::core::brute_force::MatchPolicy;
use crate::core::histogram::DuplicateTally;
use crate::core::range::ValueRange;
use crate::events::Strategy;
use serde::{Deserialize, Serialize};

/// Outcome of a single counting run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountReport {
    /// Counter that produced `duplicates`
    pub strategy: Strategy,
    /// Whether `strategy` replaced the requested one
    pub fell_back: bool,
    /// Number of elements in the dataset
    pub total: usize,
    /// Elements that repeat an earlier value
    pub duplicates: usize,
    /// Value range, absent for an empty dataset
    pub range: Option<ValueRange<i128>>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl CountReport {
    /// Duplicates as a percentage of the dataset
    pub fn duplicate_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.duplicates as f64 / self.total as f64
    }
}

/// Histogram and brute-force results for the same dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossCheckReport {
    /// Brute-force match policy in effect
    pub policy: MatchPolicy,
    /// What the histogram saw
    pub histogram: DuplicateTally,
    /// What the brute-force counter returned
    pub brute_force: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl CrossCheckReport {
    /// The brute-force result the histogram predicts for `policy`
    pub fn expected_brute_force(&self) -> usize {
        match self.policy {
            MatchPolicy::FirstMatch => self.histogram.duplicates,
            MatchPolicy::AllPairs => self.histogram.matching_pairs,
        }
    }

    /// Whether the brute-force result is exactly what the histogram predicts
    pub fn agrees(&self) -> bool {
        self.brute_force == self.expected_brute_force()
    }

    /// Brute-force result minus the histogram duplicate count.
    ///
    /// Zero under `FirstMatch`. Under `AllPairs` it equals
    /// [`DuplicateTally::excess_pairs`] when the counters agree.
    pub fn divergence(&self) -> i128 {
        self.brute_force as i128 - self.histogram.duplicates as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally() -> DuplicateTally {
        DuplicateTally {
            total: 6,
            distinct: 3,
            duplicates: 3,
            matching_pairs: 4,
            max_multiplicity: 3,
        }
    }

    #[test]
    fn all_pairs_divergence_is_explained() {
        let report = CrossCheckReport {
            policy: MatchPolicy::AllPairs,
            histogram: tally(),
            brute_force: 4,
            duration_ms: 0,
        };
        assert!(report.agrees());
        assert_eq!(report.divergence(), 1);
        assert_eq!(report.divergence(), report.histogram.excess_pairs() as i128);
    }

    #[test]
    fn unexplained_result_does_not_agree() {
        let report = CrossCheckReport {
            policy: MatchPolicy::FirstMatch,
            histogram: tally(),
            brute_force: 2,
            duration_ms: 0,
        };
        assert!(!report.agrees());
        assert_eq!(report.divergence(), -1);
    }

    #[test]
    fn percent_of_empty_dataset_is_zero() {
        let report = CountReport {
            strategy: Strategy::Histogram,
            fell_back: false,
            total: 0,
            duplicates: 0,
            range: None,
            duration_ms: 0,
        };
        assert_eq!(report.duplicate_percent(), 0.0);
    }

    #[test]
    fn report_serializes_range() {
        let report = CountReport {
            strategy: Strategy::Sorted,
            fell_back: true,
            total: 4,
            duplicates: 1,
            range: Some(ValueRange { min: -3, max: 9 }),
            duration_ms: 2,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"min\":-3"));
        assert!(json.contains("\"fell_back\":true"));
    }
}
