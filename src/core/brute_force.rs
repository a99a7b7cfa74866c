//! Pairwise duplicate counting.
//!
//! The O(n²) baseline. It shares no code with the histogram counter, which
//! is what makes it useful as a cross-check.

use super::progress::{CancellationToken, NoProgress, PercentTracker, ProgressSink};
use crate::error::CountError;
use serde::{Deserialize, Serialize};

/// What a match between `values[i]` and a later `values[j]` is worth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPolicy {
    /// Credit `i` once if any later element matches, then move on.
    ///
    /// Counts elements that have a later repeat, which equals the number of
    /// elements that repeat an earlier value.
    #[default]
    FirstMatch,
    /// Credit every matching pair `i < j`.
    ///
    /// Exceeds [`FirstMatch`](Self::FirstMatch) once any value occurs three
    /// or more times.
    AllPairs,
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::FirstMatch => write!(f, "first match"),
            MatchPolicy::AllPairs => write!(f, "all pairs"),
        }
    }
}

/// Compares every element against every later element
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceCounter {
    policy: MatchPolicy,
}

impl BruteForceCounter {
    /// Create a counter with the given match policy
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Count duplicates, reporting progress at every 1% boundary.
    pub fn count<T, P>(&self, values: &[T], progress: &mut P) -> usize
    where
        T: PartialEq,
        P: ProgressSink + ?Sized,
    {
        let mut percent = PercentTracker::new(values.len());
        let mut duplicates = 0;

        for index in 0..values.len() {
            duplicates += self.credit(values, index);
            if let Some(p) = percent.advance(index) {
                progress.report(p);
            }
        }

        duplicates
    }

    /// Like [`count`](Self::count), but checks `cancel` before each outer
    /// iteration.
    ///
    /// # Errors
    /// * `CountError::Cancelled` - the token was cancelled; no partial count
    ///   is returned
    pub fn count_cancellable<T, P>(
        &self,
        values: &[T],
        progress: &mut P,
        cancel: &CancellationToken,
    ) -> Result<usize, CountError>
    where
        T: PartialEq,
        P: ProgressSink + ?Sized,
    {
        let mut percent = PercentTracker::new(values.len());
        let mut duplicates = 0;

        for index in 0..values.len() {
            if cancel.is_cancelled() {
                return Err(CountError::Cancelled);
            }
            duplicates += self.credit(values, index);
            if let Some(p) = percent.advance(index) {
                progress.report(p);
            }
        }

        Ok(duplicates)
    }

    fn credit<T: PartialEq>(&self, values: &[T], index: usize) -> usize {
        let value = &values[index];
        let later = &values[index + 1..];
        match self.policy {
            MatchPolicy::FirstMatch => usize::from(later.contains(value)),
            MatchPolicy::AllPairs => later.iter().filter(|&other| other == value).count(),
        }
    }
}

/// Count duplicates pairwise with [`MatchPolicy::FirstMatch`].
///
/// `on_progress` receives strictly increasing percentages ending at 100.
pub fn count_duplicates_brute_force<T, F>(values: &[T], on_progress: Option<F>) -> usize
where
    T: PartialEq,
    F: FnMut(u8),
{
    let counter = BruteForceCounter::default();
    match on_progress {
        Some(mut callback) => counter.count(values, &mut callback),
        None => counter.count(values, &mut NoProgress),
    }
}
