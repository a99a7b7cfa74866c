//! Histogram-based duplicate counting.
//!
//! Trades O(range) memory for a single O(n) pass: every value maps to the
//! slot `value - min`, and any increment that lifts a slot above one marks
//! a duplicate.

use super::range::{Sample, ValueRange};
use crate::error::CountError;
use serde::{Deserialize, Serialize};

/// Default histogram ceiling: 2^27 slots of `u32`, 512 MiB.
pub const DEFAULT_MAX_SLOTS: usize = 1 << 27;

/// Histogram sizing limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// Largest histogram, in slots, a single call may allocate
    pub max_slots: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            max_slots: DEFAULT_MAX_SLOTS,
        }
    }
}

/// Extended statistics derived from one histogram
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateTally {
    /// Number of elements counted
    pub total: usize,
    /// Number of distinct values
    pub distinct: usize,
    /// Elements that are not the first occurrence of their value
    pub duplicates: usize,
    /// Index pairs `i < j` with equal values, `Σ k(k-1)/2`
    pub matching_pairs: usize,
    /// Occurrences of the most frequent value
    pub max_multiplicity: usize,
}

impl DuplicateTally {
    /// Pairs beyond one per duplicate, `Σ (k-1)(k-2)/2`.
    ///
    /// Zero exactly when no value occurs more than twice.
    pub fn excess_pairs(&self) -> usize {
        self.matching_pairs.saturating_sub(self.duplicates)
    }
}

/// Counts duplicates with a counting array sized to the value range
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramCounter {
    config: HistogramConfig,
}

impl HistogramCounter {
    /// Create a counter with the given limits
    pub fn new(config: HistogramConfig) -> Self {
        Self { config }
    }

    /// Create a counter with a custom slot ceiling
    pub fn with_max_slots(max_slots: usize) -> Self {
        Self::new(HistogramConfig { max_slots })
    }

    /// Count elements that repeat an earlier value.
    ///
    /// # Errors
    /// * `CountError::InvertedRange` - `range.min > range.max`
    /// * `CountError::Allocation` - the range needs more than `max_slots`
    ///   slots, or the allocator refused the buffer
    /// * `CountError::RangeOverflow` - the range is not addressable
    /// * `CountError::ValueOutOfRange` - `range` does not cover `values`
    pub fn count<T: Sample>(
        &self,
        values: &[T],
        range: &ValueRange<T>,
    ) -> Result<usize, CountError> {
        let mut histogram = self.prepare(range)?;
        let mut duplicates = 0;
        for &value in values {
            if histogram.record(value)? > 1 {
                duplicates += 1;
            }
        }
        Ok(duplicates)
    }

    /// Like [`count`](Self::count), but also summarizes the multiplicities.
    ///
    /// Slots saturate at `u32::MAX` occurrences, so the tally is exact only
    /// while no value repeats more often than that.
    pub fn tally<T: Sample>(
        &self,
        values: &[T],
        range: &ValueRange<T>,
    ) -> Result<DuplicateTally, CountError> {
        self.prepare(range)?.tally(values)
    }

    /// Allocate an empty histogram for `range` without counting anything.
    pub(crate) fn prepare<T: Sample>(
        &self,
        range: &ValueRange<T>,
    ) -> Result<Histogram<T>, CountError> {
        Histogram::allocate(range, self.config.max_slots)
    }
}

/// Per-call counting array. Never outlives the call that built it.
pub(crate) struct Histogram<T> {
    range: ValueRange<T>,
    slots: Vec<u32>,
}

impl<T: Sample> Histogram<T> {
    fn allocate(range: &ValueRange<T>, max_slots: usize) -> Result<Self, CountError> {
        if range.is_inverted() {
            return Err(CountError::InvertedRange {
                min: range.min.widen(),
                max: range.max.widen(),
            });
        }
        let span = range.span();
        if span > max_slots as u128 {
            return Err(CountError::Allocation { span, max_slots });
        }
        let len = range.slot_count()?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .map_err(|_| CountError::Allocation { span, max_slots })?;
        slots.resize(len, 0);

        Ok(Self {
            range: *range,
            slots,
        })
    }

    /// Add one occurrence and return the slot's new count.
    ///
    /// Saturates at `u32::MAX`, which leaves the `> 1` test unaffected.
    fn record(&mut self, value: T) -> Result<u32, CountError> {
        let index = self
            .range
            .offset(value)
            .ok_or_else(|| CountError::ValueOutOfRange {
                value: value.widen(),
                min: self.range.min.widen(),
                max: self.range.max.widen(),
            })?;
        let slot = &mut self.slots[index];
        *slot = slot.saturating_add(1);
        Ok(*slot)
    }

    /// Record every value, then summarize.
    pub(crate) fn tally(mut self, values: &[T]) -> Result<DuplicateTally, CountError> {
        for &value in values {
            self.record(value)?;
        }
        Ok(self.summarize())
    }

    fn summarize(&self) -> DuplicateTally {
        let mut tally = DuplicateTally::default();
        for &slot in self.slots.iter().filter(|&&slot| slot > 0) {
            let k = slot as usize;
            tally.total += k;
            tally.distinct += 1;
            tally.duplicates += k - 1;
            tally.matching_pairs = tally
                .matching_pairs
                .saturating_add(k.saturating_mul(k - 1) / 2);
            tally.max_multiplicity = tally.max_multiplicity.max(k);
        }
        tally
    }

    #[cfg(test)]
    fn total(&self) -> u64 {
        self.slots.iter().map(|&slot| u64::from(slot)).sum()
    }
}

/// Count duplicates against a range from [`scan_range`](super::scan_range),
/// using the default slot ceiling.
pub fn count_duplicates_histogram<T: Sample>(
    values: &[T],
    range: &ValueRange<T>,
) -> Result<usize, CountError> {
    HistogramCounter::default().count(values, range)
}
