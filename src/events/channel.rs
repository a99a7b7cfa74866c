//! Crossbeam-backed event channel.
//!
//! Lets the engine report progress to whichever thread renders it,
//! without the engine knowing anything about the renderer.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::{CountEvent, Event, ProgressEvent};

/// Sending half handed to the counting engine.
///
/// Cheap to clone; every clone feeds the same receiver.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Send an event.
    ///
    /// Progress is advisory: once the receiver is gone, events are dropped
    /// and counting carries on.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }

    /// Shorthand for a [`CountEvent::Progress`] event.
    pub fn progress(&self, percent_complete: u8) {
        self.send(Event::Count(CountEvent::Progress(ProgressEvent {
            percent_complete,
        })));
    }
}

/// Receiving half, owned by the UI layer.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Blocking iterator that ends when every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Constructor namespace for event channels.
pub struct EventChannel;

impl EventChannel {
    /// Unbounded channel. Events are a few bytes each and the brute-force
    /// counter emits at most 100 progress events per run.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender whose receiver is already gone.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn progress_crosses_threads() {
        let (sender, receiver) = EventChannel::new();

        let handle = thread::spawn(move || {
            sender.progress(37);
        });
        handle.join().unwrap();

        match receiver.iter().next() {
            Some(Event::Count(CountEvent::Progress(p))) => assert_eq!(p.percent_complete, 37),
            other => panic!("Wrong event type: {other:?}"),
        };
    }

    #[test]
    fn null_sender_discards_silently() {
        let sender = null_sender();
        sender.progress(100);
        sender.send(Event::Count(CountEvent::Cancelled));
    }

    #[test]
    fn iter_ends_after_senders_drop() {
        let (sender, receiver) = EventChannel::new();
        let clone = sender.clone();
        sender.progress(1);
        clone.progress(2);
        drop(sender);
        drop(clone);

        assert_eq!(receiver.iter().count(), 2);
    }
}
