//! # Events Module
//!
//! Event-driven progress reporting for the counting engine.
//!
//! ## Design
//! The engine emits events through a channel so any front end (CLI
//! progress bar, GUI, log) can subscribe without the engine depending on it.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Count(CountEvent::Progress(p)) = event {
//!             println!("{}%", p.percent_complete);
//!         }
//!     }
//! });
//!
//! counter.run_with_events(&values, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
