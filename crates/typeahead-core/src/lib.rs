//! Core systems for Typeahead.
//!
//! This crate provides the plumbing the Typeahead selection controls are built on:
//!
//! - **Signal/Slot System**: Type-safe notifications from a control to its owner
//! - **Property System**: Change-detecting value cells for owner-held state
//! - **Scheduler**: Cancellable deferred tasks driven by an injectable clock
//! - **Pointer Events**: A process-wide pointer event source controls can subscribe to
//!
//! # Signal/Slot Example
//!
//! ```
//! use typeahead_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Scheduler Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use typeahead_core::{ManualClock, Scheduler, SharedTaskScheduler};
//!
//! let clock = Arc::new(ManualClock::new());
//! let scheduler = SharedTaskScheduler::with_clock(clock.clone());
//!
//! let id = scheduler.schedule_once(Duration::from_millis(300), Box::new(|| {
//!     println!("debounced!");
//! }));
//! assert!(scheduler.is_active(id));
//!
//! clock.advance(Duration::from_millis(300));
//! assert_eq!(scheduler.process_ready(), 1);
//! ```

mod error;
pub mod logging;
pub mod pointer;
pub mod property;
pub mod scheduler;
pub mod signal;

pub use error::{CoreError, Result, SchedulerError, SignalError};
pub use pointer::{
    MouseButton, Point, PointerEvent, PointerEventBus, PointerEventKind, PointerEventSource,
    PointerHandler, Rect, Size,
};
pub use property::Property;
pub use scheduler::{
    Clock, ManualClock, ScheduledTaskId, Scheduler, SharedTaskScheduler, SystemClock,
    TaskScheduler,
};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
