//! Prelude module for Typeahead.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use typeahead::prelude::*;
//! ```
//!
//! This provides access to:
//! - The control and its builder (`Autocomplete`, `AutocompleteBuilder`)
//! - Configuration and input events (`AutocompleteConfig`, `AutocompleteEvent`, `Key`)
//! - The owner's value and the view model (`Selection`, `AutocompleteView`)
//! - Host capabilities (`Scheduler`, `SharedTaskScheduler`, `PointerEventBus`)

// ============================================================================
// Control
// ============================================================================

pub use crate::autocomplete::{
    Autocomplete, AutocompleteBuilder, AutocompleteConfig, AutocompleteEvent, AutocompleteView,
    DropdownView, FilterError, FocusAfterFilter, Key, RowView, Selection,
};

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use typeahead_core::{ConnectionId, Property, Signal};

// ============================================================================
// Host Capabilities
// ============================================================================

pub use typeahead_core::{
    Clock, ManualClock, MouseButton, Point, PointerEvent, PointerEventBus, PointerEventSource,
    Rect, Scheduler, SharedTaskScheduler, SystemClock,
};
