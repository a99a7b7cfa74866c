//! Value range scanning.
//!
//! One linear pass over the dataset to find the extremes that size the
//! histogram.

use crate::error::CountError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Integer types the counters accept.
///
/// Every implementor widens losslessly into `i128`, so `max - min + 1`
/// is always computable, even for `i64::MIN..=i64::MAX`.
pub trait Sample: Copy + Ord + Debug + Send + Sync {
    /// Lossless widening used for offset arithmetic
    fn widen(self) -> i128;
}

macro_rules! impl_sample {
    ($($ty:ty),*) => {
        $(
            impl Sample for $ty {
                #[inline]
                fn widen(self) -> i128 {
                    i128::from(self)
                }
            }
        )*
    };
}

impl_sample!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Inclusive range `[min, max]` of the values present in a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    /// Smallest value present
    pub min: T,
    /// Largest value present
    pub max: T,
}

impl<T: Sample> ValueRange<T> {
    /// Build a range, or `None` when `min > max`
    pub fn new(min: T, max: T) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// Number of histogram slots the range needs (`max - min + 1`).
    ///
    /// Zero when the bounds are inverted.
    pub fn span(&self) -> u128 {
        u128::try_from(self.max.widen() - self.min.widen() + 1).unwrap_or(0)
    }

    /// Whether `min > max`
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// The span as an addressable length
    pub fn slot_count(&self) -> Result<usize, CountError> {
        let span = self.span();
        usize::try_from(span).map_err(|_| CountError::RangeOverflow { span })
    }

    /// Whether `value` falls inside the range
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Normalized index `value - min`, or `None` outside the range
    pub fn offset(&self, value: T) -> Option<usize> {
        if !self.contains(value) {
            return None;
        }
        usize::try_from(value.widen() - self.min.widen()).ok()
    }

    /// The same range expressed in `i128`, for reports
    pub fn widen(&self) -> ValueRange<i128> {
        ValueRange {
            min: self.min.widen(),
            max: self.max.widen(),
        }
    }
}

/// Find the minimum and maximum in one pass, or `None` for an empty dataset.
pub fn find_extremes<T: Sample>(values: &[T]) -> Option<ValueRange<T>> {
    let (&first, rest) = values.split_first()?;
    let mut min = first;
    let mut max = first;

    for &value in rest {
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }

    Some(ValueRange { min, max })
}

/// Scan a dataset for its value range.
///
/// # Errors
/// * `CountError::EmptyDataset` - nothing to scan; callers should treat the
///   duplicate count as zero without building a histogram
/// * `CountError::RangeOverflow` - `max - min + 1` does not fit in `usize`
pub fn scan_range<T: Sample>(values: &[T]) -> Result<ValueRange<T>, CountError> {
    let range = find_extremes(values).ok_or(CountError::EmptyDataset)?;
    range.slot_count()?;
    Ok(range)
}
