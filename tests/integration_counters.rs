//! Integration tests for the counting engine.
//!
//! These tests verify end-to-end behavior including:
//! - The public function surface on the documented examples
//! - Empty datasets short-circuiting before any histogram is built
//! - Pathological ranges falling back instead of allocating
//! - Datasets loaded from disk

use duplicate_value_counter::core::engine::{DuplicateCounter, Fallback};
use duplicate_value_counter::core::{HistogramCounter, MatchPolicy};
use duplicate_value_counter::dataset;
use duplicate_value_counter::events::{CountEvent, Event, EventChannel, Strategy};
use duplicate_value_counter::{
    count_duplicates_brute_force, count_duplicates_histogram, count_duplicates_sorted, scan_range,
    CountError, DuplicateCounterError, ValueRange,
};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn documented_examples_hold() {
    assert_eq!(scan_range(&[5]).unwrap(), ValueRange { min: 5, max: 5 });
    assert_eq!(
        scan_range(&[3, -7, 10, -7]).unwrap(),
        ValueRange { min: -7, max: 10 }
    );

    let values = [1, 2, 2, 3, 3, 3];
    assert_eq!(
        count_duplicates_histogram(&values, &ValueRange { min: 1, max: 3 }).unwrap(),
        3
    );
    assert_eq!(count_duplicates_brute_force::<_, fn(u8)>(&values, None), 3);
}

#[test]
fn empty_dataset_yields_zero_everywhere() {
    let values: [i32; 0] = [];

    assert_eq!(scan_range(&values), Err(CountError::EmptyDataset));
    assert_eq!(count_duplicates_brute_force::<_, fn(u8)>(&values, None), 0);
    assert_eq!(count_duplicates_sorted(&values), 0);

    // A zero-slot ceiling proves no histogram is requested.
    let report = DuplicateCounter::builder()
        .max_slots(0)
        .fallback(Fallback::None)
        .build()
        .run(&values)
        .unwrap();
    assert_eq!(report.duplicates, 0);
}

#[test]
fn small_ceiling_reports_allocation_error_not_zero() {
    let values: Vec<i32> = (0..1_000).step_by(7).collect();
    let range = scan_range(&values).unwrap();

    let result = HistogramCounter::with_max_slots(100).count(&values, &range);
    assert_eq!(
        result,
        Err(CountError::Allocation {
            span: 995,
            max_slots: 100
        })
    );
}

#[test]
fn adversarial_range_is_counted_by_fallback() {
    let values = [i64::MIN, i64::MAX, -1, i64::MIN, 0, i64::MAX, i64::MAX];
    let (sender, receiver) = EventChannel::new();

    let report = DuplicateCounter::builder()
        .build()
        .run_with_events(&values, &sender)
        .unwrap();
    drop(sender);

    assert_eq!(report.duplicates, 3);
    assert_eq!(report.strategy, Strategy::Sorted);
    assert!(report.fell_back);
    assert!(receiver
        .iter()
        .any(|e| matches!(e, Event::Count(CountEvent::FallbackUsed { .. }))));
}

#[test]
fn adversarial_range_without_fallback_is_an_error() {
    let values = [i32::MIN, i32::MAX];
    let result = DuplicateCounter::builder()
        .fallback(Fallback::None)
        .build()
        .run(&values);

    assert!(matches!(
        result,
        Err(DuplicateCounterError::Count(CountError::Allocation { .. }))
    ));
}

#[test]
fn counters_agree_on_generated_dataset() {
    let values = dataset::generate(3_000, 0, 999, 42).unwrap();
    let range = scan_range(&values).unwrap();

    let histogram = count_duplicates_histogram(&values, &range).unwrap();
    let brute_force = count_duplicates_brute_force::<_, fn(u8)>(&values, None);
    let sorted = count_duplicates_sorted(&values);

    assert_eq!(histogram, brute_force);
    assert_eq!(histogram, sorted);
}

#[test]
fn cross_check_on_generated_dataset() {
    let values = dataset::generate(2_000, -20, 20, 9).unwrap();

    for policy in [MatchPolicy::FirstMatch, MatchPolicy::AllPairs] {
        let report = DuplicateCounter::builder()
            .policy(policy)
            .build()
            .cross_check(&values, &duplicate_value_counter::events::null_sender())
            .unwrap();
        assert!(report.agrees(), "{policy} disagreed: {report:?}");
    }
}

#[test]
fn counts_dataset_loaded_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "7, 7, 7").unwrap();
    writeln!(file, "-3 12 -3").unwrap();

    let values = dataset::load(file.path()).unwrap();
    let report = DuplicateCounter::builder().build().run(&values).unwrap();

    assert_eq!(report.total, 6);
    assert_eq!(report.duplicates, 3);
    assert_eq!(report.range, Some(ValueRange { min: -3, max: 12 }));
}
