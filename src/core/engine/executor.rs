//! Engine execution implementation.

use super::report::{CountReport, CrossCheckReport};
use crate::core::brute_force::{BruteForceCounter, MatchPolicy};
use crate::core::histogram::{DuplicateTally, HistogramConfig, HistogramCounter};
use crate::core::progress::CancellationToken;
use crate::core::range::{find_extremes, Sample, ValueRange};
use crate::core::sorted::count_duplicates_sorted;
use crate::error::{CountError, DuplicateCounterError};
use crate::events::{null_sender, CountEvent, CrossCheckEvent, Event, EventSender, Strategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

/// What to do when the histogram cannot be allocated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fallback {
    /// Report the allocation error
    None,
    /// Sort a copy of the dataset
    #[default]
    Sorted,
    /// Compare every pair
    BruteForce,
}

/// Configuration for the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Counter to try first
    pub strategy: Strategy,
    /// Histogram sizing limits
    pub histogram: HistogramConfig,
    /// Recovery from histogram allocation failures
    pub fallback: Fallback,
    /// Brute-force policy used by cross-checks
    pub policy: MatchPolicy,
}

/// Builder for engine configuration
#[derive(Default)]
pub struct DuplicateCounterBuilder {
    config: CounterConfig,
    cancel: Option<CancellationToken>,
}

impl DuplicateCounterBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the counter to try first
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the histogram slot ceiling
    pub fn max_slots(mut self, max_slots: usize) -> Self {
        self.config.histogram.max_slots = max_slots;
        self
    }

    /// Set the fallback used when the histogram is too large
    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.config.fallback = fallback;
        self
    }

    /// Set the brute-force match policy for cross-checks.
    ///
    /// Plain counting runs always use [`MatchPolicy::FirstMatch`], so a
    /// duplicate count means the same thing whichever counter produced it.
    pub fn policy(mut self, policy: MatchPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Share a cancellation token with the caller
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Build the engine
    pub fn build(self) -> DuplicateCounter {
        DuplicateCounter {
            config: self.config,
            cancel: self.cancel.unwrap_or_default(),
        }
    }
}

/// The duplicate counting engine
pub struct DuplicateCounter {
    config: CounterConfig,
    cancel: CancellationToken,
}

impl DuplicateCounter {
    /// Create a new engine builder
    pub fn builder() -> DuplicateCounterBuilder {
        DuplicateCounterBuilder::new()
    }

    /// The active configuration
    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Count duplicates without events
    pub fn run<T: Sample>(&self, values: &[T]) -> Result<CountReport, DuplicateCounterError> {
        self.run_with_events(values, &null_sender())
    }

    /// Count duplicates, reporting progress and fallbacks through `events`
    pub fn run_with_events<T: Sample>(
        &self,
        values: &[T],
        events: &EventSender,
    ) -> Result<CountReport, DuplicateCounterError> {
        let start_time = Instant::now();
        let requested = self.config.strategy;

        events.send(Event::Count(CountEvent::Started {
            strategy: requested,
            total: values.len(),
        }));
        debug!(total = values.len(), strategy = %requested, "counting duplicates");

        let range = find_extremes(values);
        let outcome = match range {
            // Nothing to size a histogram for.
            None => Ok((requested, 0)),
            Some(range) => self.dispatch(values, &range, events),
        };

        let (strategy, duplicates) = match outcome {
            Ok(counted) => counted,
            Err(CountError::Cancelled) => {
                events.send(Event::Count(CountEvent::Cancelled));
                info!("counting cancelled");
                return Err(CountError::Cancelled.into());
            }
            Err(e) => return Err(e.into()),
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;
        events.send(Event::Count(CountEvent::Completed {
            strategy,
            duplicates,
            duration_ms,
        }));
        info!(duplicates, total = values.len(), %strategy, duration_ms, "count complete");

        Ok(CountReport {
            strategy,
            fell_back: strategy != requested,
            total: values.len(),
            duplicates,
            range: range.map(|r| r.widen()),
            duration_ms,
        })
    }

    /// Run the histogram and brute-force counters side by side.
    ///
    /// The two share no code, so agreement is evidence that both are right.
    /// Histogram allocation failures are not recovered here: without a
    /// histogram there is nothing to check against. The histogram is
    /// allocated before the brute-force pass starts, so such a failure
    /// returns immediately.
    pub fn cross_check<T: Sample>(
        &self,
        values: &[T],
        events: &EventSender,
    ) -> Result<CrossCheckReport, DuplicateCounterError> {
        let start_time = Instant::now();
        events.send(Event::CrossCheck(CrossCheckEvent::Started {
            total: values.len(),
        }));

        let histogram = match find_extremes(values) {
            Some(range) => Some(HistogramCounter::new(self.config.histogram).prepare(&range)?),
            None => None,
        };
        let brute_force = BruteForceCounter::new(self.config.policy);

        let (tally, brute_count) = rayon::join(
            move || match histogram {
                Some(histogram) => histogram.tally(values),
                None => Ok(DuplicateTally::default()),
            },
            || {
                let mut sink = events.clone();
                brute_force.count_cancellable(values, &mut sink, &self.cancel)
            },
        );

        let report = CrossCheckReport {
            policy: self.config.policy,
            histogram: tally?,
            brute_force: brute_count?,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        events.send(Event::CrossCheck(CrossCheckEvent::Completed {
            histogram: report.histogram.duplicates,
            brute_force: report.brute_force,
            agrees: report.agrees(),
        }));
        if report.agrees() {
            info!(
                histogram = report.histogram.duplicates,
                brute_force = report.brute_force,
                policy = %report.policy,
                "cross-check agrees"
            );
        } else {
            warn!(
                expected = report.expected_brute_force(),
                brute_force = report.brute_force,
                policy = %report.policy,
                "cross-check mismatch"
            );
        }

        Ok(report)
    }

    fn dispatch<T: Sample>(
        &self,
        values: &[T],
        range: &ValueRange<T>,
        events: &EventSender,
    ) -> Result<(Strategy, usize), CountError> {
        let requested = self.config.strategy;
        match self.count_with(requested, values, range, events) {
            Err(cause) if requested == Strategy::Histogram && cause.is_recoverable() => {
                let to = match self.config.fallback {
                    Fallback::None => return Err(cause),
                    Fallback::Sorted => Strategy::Sorted,
                    Fallback::BruteForce => Strategy::BruteForce,
                };
                warn!(%cause, fallback = %to, "histogram unavailable, falling back");
                events.send(Event::Count(CountEvent::FallbackUsed {
                    from: requested,
                    to,
                    reason: cause.to_string(),
                }));
                Ok((to, self.count_with(to, values, range, events)?))
            }
            result => Ok((requested, result?)),
        }
    }

    fn count_with<T: Sample>(
        &self,
        strategy: Strategy,
        values: &[T],
        range: &ValueRange<T>,
        events: &EventSender,
    ) -> Result<usize, CountError> {
        match strategy {
            Strategy::Histogram => {
                HistogramCounter::new(self.config.histogram).count(values, range)
            }
            Strategy::BruteForce => {
                let mut sink = events.clone();
                BruteForceCounter::new(MatchPolicy::FirstMatch).count_cancellable(
                    values,
                    &mut sink,
                    &self.cancel,
                )
            }
            Strategy::Sorted => Ok(count_duplicates_sorted(values)),
        }
    }
}
