//! Sort-based duplicate counting.
//!
//! Independent of the value range, so it stands in for the histogram when
//! the range is too wide to allocate.

/// Count elements that repeat an earlier value by sorting a copy and
/// comparing neighbours. O(n log n) time, O(n) space.
pub fn count_duplicates_sorted<T: Ord + Copy>(values: &[T]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).filter(|pair| pair[0] == pair[1]).count()
}
