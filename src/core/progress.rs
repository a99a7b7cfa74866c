//! Progress sinks and cooperative cancellation.

use crate::events::EventSender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives percent-complete updates from a long-running count.
///
/// Progress is observational only: sinks cannot influence the result.
pub trait ProgressSink {
    /// Called with a strictly increasing percentage in `1..=100`
    fn report(&mut self, percent_complete: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent_complete: u8) {
        self(percent_complete);
    }
}

impl ProgressSink for EventSender {
    fn report(&mut self, percent_complete: u8) {
        self.progress(percent_complete);
    }
}

/// Sink that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent_complete: u8) {}
}

/// Turns outer-loop indices into 1% boundary crossings.
#[derive(Debug)]
pub(crate) struct PercentTracker {
    total: usize,
    last: u8,
}

impl PercentTracker {
    pub(crate) fn new(total: usize) -> Self {
        Self { total, last: 0 }
    }

    /// Percentage to emit after finishing `index`, if a boundary was crossed
    pub(crate) fn advance(&mut self, index: usize) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let percent = ((index as u128 + 1) * 100 / self.total as u128).min(100) as u8;
        if percent > self.last {
            self.last = percent;
            Some(percent)
        } else {
            None
        }
    }
}

/// Shared flag that asks a running count to stop.
///
/// Clones share the flag, so one clone can be handed to a UI thread while
/// the engine holds another.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CountEvent, Event, EventChannel};

    #[test]
    fn tracker_emits_each_boundary_once() {
        let mut tracker = PercentTracker::new(200);
        let emitted: Vec<u8> = (0..200).filter_map(|i| tracker.advance(i)).collect();
        assert_eq!(emitted, (1..=100).collect::<Vec<u8>>());
    }

    #[test]
    fn tracker_skips_boundaries_on_small_inputs() {
        let mut tracker = PercentTracker::new(3);
        let emitted: Vec<u8> = (0..3).filter_map(|i| tracker.advance(i)).collect();
        assert_eq!(emitted, vec![33, 66, 100]);
    }

    #[test]
    fn tracker_on_empty_total_is_silent() {
        let mut tracker = PercentTracker::new(0);
        assert_eq!(tracker.advance(0), None);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: u8| seen.push(p);
            sink.report(5);
            sink.report(60);
        }
        assert_eq!(seen, vec![5, 60]);
    }

    #[test]
    fn event_sender_is_a_sink() {
        let (mut sender, receiver) = EventChannel::new();
        sender.report(77);
        drop(sender);

        let events: Vec<_> = receiver.iter().collect();
        assert!(matches!(
            events.as_slice(),
            [Event::Count(CountEvent::Progress(p))] if p.percent_complete == 77
        ));
    }

    #[test]
    fn cancellation_is_shared_between_clones() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
    }
}
