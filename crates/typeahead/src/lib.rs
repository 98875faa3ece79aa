//! Typeahead: a debounced autocomplete selection control.
//!
//! The [`Autocomplete`] control filters a list of options as the user types,
//! lets them move through the matches with the keyboard, and proposes single
//! or multiple selections to its owner. It is headless: the host feeds it
//! [`AutocompleteEvent`]s and draws the [`AutocompleteView`] it returns.
//!
//! The building blocks it relies on (signals, scheduled tasks, pointer
//! events) live in [`typeahead_core`].
//!
//! # Logging
//!
//! The control logs through `tracing` under the `typeahead::autocomplete`
//! target. See [`typeahead_core::logging`] for the full list.

pub mod autocomplete;
mod error;
pub mod prelude;

pub use autocomplete::{
    Autocomplete, AutocompleteBuilder, AutocompleteConfig, AutocompleteEvent, AutocompleteItem,
    AutocompleteView, DropdownView, FilterError, FocusAfterFilter, Key, RowView, Selection,
};
pub use error::{Error, Result};
