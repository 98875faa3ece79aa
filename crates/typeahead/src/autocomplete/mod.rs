//! Autocomplete selection control.
//!
//! [`Autocomplete`] lets a user type to narrow a list of options, move
//! through the matches with the keyboard, and pick one (or several) of them.
//! It coordinates four behaviors:
//!
//! - **Input tracking**: every text change opens the dropdown and is reported
//!   through [`input_changed`](Autocomplete::input_changed).
//! - **Debounced filtering**: the visible list is recomputed once the input
//!   has been quiet for the configured delay. Bursts of keystrokes produce a
//!   single pass over the final text.
//! - **Visibility and focus**: clicks, keys and outside clicks open and close
//!   the dropdown; arrows move a wrapping focus over the visible rows.
//! - **Selection commits**: clicking a row, pressing Enter or toggling a
//!   checkbox proposes a new value through
//!   [`value_changed`](Autocomplete::value_changed).
//!
//! The control never owns the selected value. The owner keeps it, listens to
//! `value_changed`, and feeds the accepted value back with
//! [`set_value`](Autocomplete::set_value).
//!
//! # Host integration
//!
//! A control is built against two capabilities:
//!
//! - a [`Scheduler`] for the debounce timer. The host calls
//!   `process_ready()` on it from its event loop.
//! - a [`PointerEventSource`] delivering every pointer event in the window,
//!   used to close the dropdown on clicks outside the control. The host
//!   reports the control's regions with
//!   [`set_input_rect`](Autocomplete::set_input_rect) and
//!   [`set_dropdown_rect`](Autocomplete::set_dropdown_rect). Outside clicks
//!   are not detected until both are known.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use typeahead::{Autocomplete, AutocompleteConfig, AutocompleteEvent, Key};
//! use typeahead_core::{ManualClock, PointerEventBus, SharedTaskScheduler};
//!
//! let clock = Arc::new(ManualClock::new());
//! let scheduler = Arc::new(SharedTaskScheduler::with_clock(clock.clone()));
//! let pointer = Arc::new(PointerEventBus::new());
//!
//! let fruit = Autocomplete::builder(vec!["Apple", "Apricot", "Banana"])
//!     .with_config(AutocompleteConfig::new().with_debounce_time(Duration::from_millis(100)))
//!     .build(scheduler.clone(), pointer);
//!
//! fruit.value_changed().connect(|value| println!("picked {value:?}"));
//!
//! fruit.handle_event(AutocompleteEvent::text("ap"));
//! clock.advance(Duration::from_millis(100));
//! scheduler.process_ready();
//! assert_eq!(fruit.filtered(), vec!["Apple", "Apricot"]);
//!
//! fruit.handle_event(AutocompleteEvent::KeyPress(Key::ArrowDown));
//! fruit.handle_event(AutocompleteEvent::KeyPress(Key::Enter));
//! ```

mod config;
mod events;
mod filter;
mod popup;
mod selection;
mod view;

pub use config::{AutocompleteConfig, DEFAULT_DEBOUNCE_MS};
pub use events::{AutocompleteEvent, Key};
pub use filter::{FilterError, FilterFn, TextFn, prefix_filter};
pub use popup::{FocusAfterFilter, PopupState};
pub use selection::Selection;
pub use view::{AutocompleteView, DropdownView, RenderOption, RowView};

use std::fmt::Display;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use typeahead_core::logging::{span_names, targets};
use typeahead_core::{
    ConnectionId, PointerEvent, PointerEventSource, Rect, ScheduledTaskId, Scheduler, Signal,
};

use crate::error::Result;
use filter::compute_filtered;

/// Requirements on option types.
///
/// Options are compared with `PartialEq` to decide whether they are selected,
/// and are cloned into the filtered list and into proposed values.
pub trait AutocompleteItem: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> AutocompleteItem for T {}

// ============================================================================
// Session State
// ============================================================================

/// Mutable state of one control instance.
struct SessionState<T> {
    config: AutocompleteConfig,
    options: Vec<T>,
    /// Read-only copy of the owner's value.
    value: Selection<T>,
    input_text: String,
    filtered: Vec<T>,
    popup: PopupState,
    /// The armed debounce task, if any.
    pending: Option<ScheduledTaskId>,
    /// Bumped on every arm/cancel; a pass only applies if it still matches.
    epoch: u64,
    filter: Option<FilterFn<T>>,
    text_fn: TextFn<T>,
    render_option: Option<RenderOption<T>>,
    input_rect: Option<Rect>,
    dropdown_rect: Option<Rect>,
}

/// Notifications collected under the state lock and emitted after it.
enum Notification<T> {
    ValueChanged(Selection<T>),
    InputChanged(String),
    OpenChanged(bool),
}

struct Signals<T: 'static> {
    value_changed: Signal<Selection<T>>,
    input_changed: Signal<String>,
    filtered_changed: Signal<usize>,
    filter_failed: Signal<FilterError>,
    open_changed: Signal<bool>,
}

/// State shared with scheduled passes and the pointer listener.
///
/// Those only hold a `Weak` to this, so they become no-ops once the control
/// is dropped.
struct Shared<T: AutocompleteItem> {
    state: Mutex<SessionState<T>>,
    scheduler: Arc<dyn Scheduler>,
    signals: Signals<T>,
}

impl<T: AutocompleteItem> Shared<T> {
    fn notify(&self, notes: Vec<Notification<T>>) {
        for note in notes {
            match note {
                Notification::ValueChanged(value) => self.signals.value_changed.emit(value),
                Notification::InputChanged(text) => self.signals.input_changed.emit(text),
                Notification::OpenChanged(open) => self.signals.open_changed.emit(open),
            }
        }
    }

    /// Cancel any pending pass and schedule a new one.
    fn arm_filter(self: &Arc<Self>, state: &mut SessionState<T>) {
        if let Err(err) = self.disarm_filter(state) {
            tracing::trace!(target: targets::AUTOCOMPLETE, error = %err, "previous pass already gone");
        }

        let epoch = state.epoch;
        let delay = state.config.debounce_time();
        let weak: Weak<Self> = Arc::downgrade(self);
        let id = self.scheduler.schedule_once(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    // Failures are already logged and signalled.
                    let _ = shared.run_pass(epoch);
                }
            }),
        );
        state.pending = Some(id);

        tracing::trace!(
            target: targets::AUTOCOMPLETE,
            delay_ms = delay.as_millis() as u64,
            "filter pass armed"
        );
    }

    /// Cancel the pending pass, if any. Returns the cancelled task.
    fn disarm_filter(&self, state: &mut SessionState<T>) -> Result<Option<ScheduledTaskId>> {
        state.epoch += 1;
        let Some(id) = state.pending.take() else {
            return Ok(None);
        };
        self.scheduler.cancel(id)?;
        Ok(Some(id))
    }

    /// Recompute the visible list for the pass armed at `epoch`.
    ///
    /// The filter runs without the state lock held.
    fn run_pass(&self, epoch: u64) -> std::result::Result<usize, FilterError> {
        let (query, options, filter, text_fn) = {
            let mut state = self.state.lock();
            if state.epoch != epoch {
                tracing::trace!(target: targets::AUTOCOMPLETE, "skipping superseded filter pass");
                return Ok(state.filtered.len());
            }
            state.pending = None;
            (
                state.input_text.clone(),
                state.options.clone(),
                state.filter.clone(),
                state.text_fn.clone(),
            )
        };

        let _span = tracing::debug_span!(
            target: targets::AUTOCOMPLETE,
            "autocomplete",
            operation = span_names::FILTER_PASS,
            query = %query
        )
        .entered();

        let (filtered, failure) = match compute_filtered(&query, &options, filter.as_ref(), &text_fn)
        {
            Ok(filtered) => (filtered, None),
            Err(err) => {
                tracing::error!(target: targets::AUTOCOMPLETE, error = %err, "filter failed");
                (Vec::new(), Some(err))
            }
        };
        let count = filtered.len();

        {
            let mut state = self.state.lock();
            if state.epoch != epoch {
                tracing::trace!(target: targets::AUTOCOMPLETE, "discarding superseded filter result");
                return Ok(count);
            }
            state.filtered = filtered;
            let policy = state.config.focus_after_filter;
            state.popup.reconcile(count, policy);
        }

        tracing::debug!(target: targets::AUTOCOMPLETE, matches = count, "filter pass complete");
        self.signals.filtered_changed.emit(count);

        match failure {
            Some(err) => {
                self.signals.filter_failed.emit(err.clone());
                Err(err)
            }
            None => Ok(count),
        }
    }

    /// Apply a commit of `option`, honoring the post-selection settings.
    fn commit_locked(
        self: &Arc<Self>,
        state: &mut SessionState<T>,
        option: T,
        notes: &mut Vec<Notification<T>>,
    ) {
        let _span = tracing::debug_span!(
            target: targets::AUTOCOMPLETE,
            "autocomplete",
            operation = span_names::COMMIT
        )
        .entered();

        let multiple = state.config.multiple;
        let proposed = state.value.committed(option, multiple);
        tracing::debug!(target: targets::AUTOCOMPLETE, multiple, "selection committed");
        notes.push(Notification::ValueChanged(proposed));

        if multiple {
            return;
        }
        if state.config.close_on_select && state.popup.set_open(false) {
            notes.push(Notification::OpenChanged(false));
        }
        if state.config.clear_input_on_select && !state.input_text.is_empty() {
            state.input_text.clear();
            notes.push(Notification::InputChanged(String::new()));
            self.arm_filter(state);
        }
    }

    /// Close the dropdown on a press outside the input and dropdown regions.
    ///
    /// Until the host has reported both regions no press counts as outside.
    fn handle_pointer(&self, event: &PointerEvent) {
        if !event.is_down() {
            return;
        }

        {
            let mut state = self.state.lock();
            if !state.popup.open {
                return;
            }
            let (Some(input_rect), Some(dropdown_rect)) = (state.input_rect, state.dropdown_rect)
            else {
                tracing::trace!(
                    target: targets::AUTOCOMPLETE,
                    "press ignored, control regions not reported"
                );
                return;
            };
            let position = event.position;
            if input_rect.contains(position) || dropdown_rect.contains(position) {
                return;
            }
            state.popup.set_open(false);
        }

        tracing::debug!(target: targets::AUTOCOMPLETE, "closed by outside click");
        self.signals.open_changed.emit(false);
    }
}

// ============================================================================
// Autocomplete
// ============================================================================

/// A debounced, keyboard-navigable autocomplete control.
///
/// See the [module documentation](self) for an overview.
///
/// # Signals
///
/// - `value_changed(Selection<T>)`: a commit proposes a new value
/// - `input_changed(String)`: the input text changed
/// - `filtered_changed(usize)`: a filter pass completed with this many matches
/// - `filter_failed(FilterError)`: a custom filter failed
/// - `open_changed(bool)`: the dropdown opened or closed
pub struct Autocomplete<T: AutocompleteItem> {
    shared: Arc<Shared<T>>,
    pointer: Arc<dyn PointerEventSource>,
    pointer_subscription: ConnectionId,
}

assert_impl_all!(Autocomplete<String>: Send, Sync);

impl<T: AutocompleteItem + Display> Autocomplete<T> {
    /// Start building a control whose options display via [`Display`].
    pub fn builder(options: Vec<T>) -> AutocompleteBuilder<T> {
        AutocompleteBuilder::new(options)
    }
}

impl<T: AutocompleteItem> Autocomplete<T> {
    // =========================================================================
    // Signals
    // =========================================================================

    /// Emitted with the proposed value on every commit.
    pub fn value_changed(&self) -> &Signal<Selection<T>> {
        &self.shared.signals.value_changed
    }

    /// Emitted with the full text on every input change.
    pub fn input_changed(&self) -> &Signal<String> {
        &self.shared.signals.input_changed
    }

    /// Emitted with the match count after every filter pass.
    pub fn filtered_changed(&self) -> &Signal<usize> {
        &self.shared.signals.filtered_changed
    }

    /// Emitted when a custom filter fails.
    pub fn filter_failed(&self) -> &Signal<FilterError> {
        &self.shared.signals.filter_failed
    }

    /// Emitted when the dropdown opens or closes.
    pub fn open_changed(&self) -> &Signal<bool> {
        &self.shared.signals.open_changed
    }

    // =========================================================================
    // State Access
    // =========================================================================

    /// The current input text.
    pub fn input_text(&self) -> String {
        self.shared.state.lock().input_text.clone()
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.shared.state.lock().popup.open
    }

    /// The options visible after the last filter pass.
    pub fn filtered(&self) -> Vec<T> {
        self.shared.state.lock().filtered.clone()
    }

    /// The focused row, or -1 if none.
    pub fn focused_index(&self) -> i32 {
        self.shared.state.lock().popup.focused_index
    }

    /// The option under keyboard focus.
    pub fn focused_option(&self) -> Option<T> {
        let state = self.shared.state.lock();
        state
            .popup
            .focused(state.filtered.len())
            .map(|index| state.filtered[index].clone())
    }

    /// The control's copy of the owner's value.
    pub fn value(&self) -> Selection<T> {
        self.shared.state.lock().value.clone()
    }

    /// The full option list.
    pub fn options(&self) -> Vec<T> {
        self.shared.state.lock().options.clone()
    }

    /// The current configuration.
    pub fn config(&self) -> AutocompleteConfig {
        self.shared.state.lock().config.clone()
    }

    /// Whether a debounced filter pass is waiting to run.
    pub fn has_pending_filter(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }

    /// Whether `option` is part of the current value.
    pub fn is_selected(&self, option: &T) -> bool {
        let state = self.shared.state.lock();
        state.value.is_selected(option, state.config.multiple)
    }

    // =========================================================================
    // Owner-driven Updates
    // =========================================================================

    /// Replace the control's copy of the owner's value.
    pub fn set_value(&self, value: Selection<T>) {
        self.shared.state.lock().value = value;
    }

    /// Replace the option list. Re-filters after the debounce delay.
    pub fn set_options(&self, options: Vec<T>) {
        let mut state = self.shared.state.lock();
        state.options = options;
        self.shared.arm_filter(&mut state);
    }

    /// Install an infallible custom filter. Re-filters after the debounce delay.
    pub fn set_filter<F>(&self, filter: F)
    where
        F: Fn(&str, &[T]) -> Vec<T> + Send + Sync + 'static,
    {
        self.install_filter(Some(infallible(filter)));
    }

    /// Install a fallible custom filter. Re-filters after the debounce delay.
    pub fn set_fallible_filter<F>(&self, filter: F)
    where
        F: Fn(&str, &[T]) -> std::result::Result<Vec<T>, FilterError> + Send + Sync + 'static,
    {
        self.install_filter(Some(Arc::new(filter)));
    }

    /// Go back to the default prefix filter. Re-filters after the debounce delay.
    pub fn clear_filter(&self) {
        self.install_filter(None);
    }

    fn install_filter(&self, filter: Option<FilterFn<T>>) {
        let mut state = self.shared.state.lock();
        state.filter = filter;
        self.shared.arm_filter(&mut state);
    }

    /// Change the debounce delay. Re-arms the pending pass with the new delay.
    pub fn set_debounce_time(&self, delay: Duration) {
        let mut state = self.shared.state.lock();
        state.config = state.config.clone().with_debounce_time(delay);
        self.shared.arm_filter(&mut state);
    }

    /// Install a row renderer.
    pub fn set_render_option<F>(&self, render: F)
    where
        F: Fn(&T, bool) -> String + Send + Sync + 'static,
    {
        self.shared.state.lock().render_option = Some(Arc::new(render));
    }

    /// Enable or disable user interaction. Disabling closes the dropdown.
    pub fn set_disabled(&self, disabled: bool) {
        let closed = {
            let mut state = self.shared.state.lock();
            state.config.disabled = disabled;
            disabled && state.popup.set_open(false)
        };
        if closed {
            self.shared.signals.open_changed.emit(false);
        }
    }

    /// Show or hide the busy indicator.
    pub fn set_loading(&self, loading: bool) {
        self.shared.state.lock().config.loading = loading;
    }

    /// Report where the input field is, in window coordinates.
    pub fn set_input_rect(&self, rect: Option<Rect>) {
        self.shared.state.lock().input_rect = rect;
    }

    /// Report where the dropdown is, in window coordinates.
    pub fn set_dropdown_rect(&self, rect: Option<Rect>) {
        self.shared.state.lock().dropdown_rect = rect;
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Cancel the pending filter pass without running it.
    ///
    /// Returns `true` if a pass was pending.
    pub fn cancel_pending_filter(&self) -> Result<bool> {
        let mut state = self.shared.state.lock();
        Ok(self.shared.disarm_filter(&mut state)?.is_some())
    }

    /// Run the filter now instead of waiting for the debounce delay.
    ///
    /// Returns the number of matches.
    pub fn flush_filter(&self) -> Result<usize> {
        let epoch = {
            let mut state = self.shared.state.lock();
            self.shared.disarm_filter(&mut state)?;
            state.epoch
        };
        Ok(self.shared.run_pass(epoch)?)
    }

    // =========================================================================
    // User Events
    // =========================================================================

    /// Dispatch a user event. Returns `true` if the event was handled.
    #[tracing::instrument(skip(self), target = "typeahead::autocomplete", level = "trace")]
    pub fn handle_event(&self, event: AutocompleteEvent) -> bool {
        match event {
            AutocompleteEvent::TextChanged(raw) => self.on_text_changed(raw),
            AutocompleteEvent::InputClicked => self.on_input_clicked(),
            AutocompleteEvent::KeyPress(key) => self.on_key(key),
            AutocompleteEvent::RowPointerDown(row) => self.on_row_pointer_down(row),
            AutocompleteEvent::RowMouseEnter(row) => self.on_row_mouse_enter(row),
            AutocompleteEvent::RowCheckboxToggled(row) => self.on_row_checkbox_toggled(row),
        }
    }

    /// The input text changed to `raw`.
    ///
    /// Opens the dropdown, reports the text and re-arms the debounced filter.
    pub fn on_text_changed(&self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        let mut notes = Vec::new();
        {
            let mut state = self.shared.state.lock();
            if state.config.disabled {
                return false;
            }
            state.input_text = raw.clone();
            notes.push(Notification::InputChanged(raw));
            if state.popup.set_open(true) {
                notes.push(Notification::OpenChanged(true));
            }
            self.shared.arm_filter(&mut state);
        }
        self.shared.notify(notes);
        true
    }

    /// The input field was clicked: toggle the dropdown.
    pub fn on_input_clicked(&self) -> bool {
        let open = {
            let mut state = self.shared.state.lock();
            if state.config.disabled {
                return false;
            }
            state.popup.toggle()
        };
        self.shared.signals.open_changed.emit(open);
        true
    }

    /// A key was pressed in the input field.
    pub fn on_key(&self, key: Key) -> bool {
        let mut notes = Vec::new();
        let handled = {
            let mut state = self.shared.state.lock();
            if state.config.disabled || !state.popup.open {
                return false;
            }
            let len = state.filtered.len();
            match key {
                Key::ArrowDown => state.popup.focus_next(len),
                Key::ArrowUp => state.popup.focus_previous(len),
                Key::Enter => match state.popup.focused(len) {
                    Some(index) => {
                        let option = state.filtered[index].clone();
                        self.shared.commit_locked(&mut state, option, &mut notes);
                        true
                    }
                    None => false,
                },
                Key::Escape => {
                    state.popup.set_open(false);
                    notes.push(Notification::OpenChanged(false));
                    true
                }
                Key::Other => false,
            }
        };
        self.shared.notify(notes);
        handled
    }

    /// A mouse button was pressed on a visible row: commit it.
    pub fn on_row_pointer_down(&self, row: usize) -> bool {
        self.commit_row(row, false)
    }

    /// The pointer entered a visible row: focus it.
    pub fn on_row_mouse_enter(&self, row: usize) -> bool {
        let mut state = self.shared.state.lock();
        if state.config.disabled {
            return false;
        }
        let len = state.filtered.len();
        state.popup.hover(row, len)
    }

    /// A row's checkbox was toggled. Only multi-select controls show one.
    pub fn on_row_checkbox_toggled(&self, row: usize) -> bool {
        self.commit_row(row, true)
    }

    fn commit_row(&self, row: usize, checkbox: bool) -> bool {
        let mut notes = Vec::new();
        {
            let mut state = self.shared.state.lock();
            if state.config.disabled || !state.popup.open {
                return false;
            }
            if checkbox && !state.config.multiple {
                return false;
            }
            let Some(option) = state.filtered.get(row).cloned() else {
                return false;
            };
            self.shared.commit_locked(&mut state, option, &mut notes);
        }
        self.shared.notify(notes);
        true
    }

    /// Commit `option` as if the user picked it.
    ///
    /// The option does not have to be one of the control's options.
    pub fn commit(&self, option: T) -> bool {
        let mut notes = Vec::new();
        {
            let mut state = self.shared.state.lock();
            if state.config.disabled {
                return false;
            }
            self.shared.commit_locked(&mut state, option, &mut notes);
        }
        self.shared.notify(notes);
        true
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Describe what should be on screen.
    ///
    /// The row renderer runs after the state lock is released.
    pub fn view(&self) -> AutocompleteView {
        let (config, input_text, open, focused, filtered, value, text_fn, render_option) = {
            let state = self.shared.state.lock();
            (
                state.config.clone(),
                state.input_text.clone(),
                state.popup.open,
                state.popup.focused(state.filtered.len()),
                if state.popup.open {
                    state.filtered.clone()
                } else {
                    Vec::new()
                },
                state.value.clone(),
                state.text_fn.clone(),
                state.render_option.clone(),
            )
        };

        let dropdown = if !open {
            DropdownView::Hidden
        } else if filtered.is_empty() {
            DropdownView::NoResults
        } else {
            let rows = filtered
                .iter()
                .enumerate()
                .map(|(index, option)| {
                    let selected = value.is_selected(option, config.multiple);
                    let label = match &render_option {
                        Some(render) => render(option, selected),
                        None => text_fn(option),
                    };
                    RowView {
                        index,
                        label,
                        focused: focused == Some(index),
                        selected,
                        checkbox: config.multiple,
                    }
                })
                .collect();
            DropdownView::Rows(rows)
        };

        AutocompleteView {
            label: config.label,
            description: config.description,
            placeholder: config.placeholder,
            input_text,
            disabled: config.disabled,
            loading: config.loading,
            open,
            dropdown,
        }
    }
}

impl<T: AutocompleteItem> Drop for Autocomplete<T> {
    fn drop(&mut self) {
        if let Err(err) = self.cancel_pending_filter() {
            tracing::debug!(target: targets::AUTOCOMPLETE, error = %err, "pending pass already gone");
        }
        if let Err(err) = self.pointer.unsubscribe(self.pointer_subscription) {
            tracing::debug!(target: targets::AUTOCOMPLETE, error = %err, "pointer listener already gone");
        }
    }
}

impl<T: AutocompleteItem + std::fmt::Debug> std::fmt::Debug for Autocomplete<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Autocomplete")
            .field("input_text", &state.input_text)
            .field("open", &state.popup.open)
            .field("focused_index", &state.popup.focused_index)
            .field("filtered", &state.filtered)
            .field("value", &state.value)
            .finish_non_exhaustive()
    }
}

fn infallible<T, F>(filter: F) -> FilterFn<T>
where
    T: AutocompleteItem,
    F: Fn(&str, &[T]) -> Vec<T> + Send + Sync + 'static,
{
    Arc::new(
        move |query: &str, options: &[T]| -> std::result::Result<Vec<T>, FilterError> {
            Ok(filter(query, options))
        },
    )
}

// ============================================================================
// Builder
// ============================================================================

/// Builds an [`Autocomplete`].
pub struct AutocompleteBuilder<T: AutocompleteItem> {
    options: Vec<T>,
    text_fn: TextFn<T>,
    config: AutocompleteConfig,
    value: Selection<T>,
    filter: Option<FilterFn<T>>,
    render_option: Option<RenderOption<T>>,
}

impl<T: AutocompleteItem + Display> AutocompleteBuilder<T> {
    /// Create a builder whose options display via [`Display`].
    pub fn new(options: Vec<T>) -> Self {
        Self::with_text(options, |option: &T| option.to_string())
    }
}

impl<T: AutocompleteItem> AutocompleteBuilder<T> {
    /// Create a builder with a custom text representation of options.
    ///
    /// The text is what the default filter matches against and what rows
    /// show when no renderer is installed.
    pub fn with_text<F>(options: Vec<T>, text: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            options,
            text_fn: Arc::new(text),
            config: AutocompleteConfig::default(),
            value: Selection::None,
            filter: None,
            render_option: None,
        }
    }

    /// Set the configuration using builder pattern.
    pub fn with_config(mut self, config: AutocompleteConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the owner's initial value using builder pattern.
    pub fn with_value(mut self, value: Selection<T>) -> Self {
        self.value = value;
        self
    }

    /// Replace the default prefix filter.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, &[T]) -> Vec<T> + Send + Sync + 'static,
    {
        self.filter = Some(infallible(filter));
        self
    }

    /// Replace the default prefix filter with one that can fail.
    pub fn with_fallible_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, &[T]) -> std::result::Result<Vec<T>, FilterError> + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Install a row renderer using builder pattern.
    pub fn with_render_option<F>(mut self, render: F) -> Self
    where
        F: Fn(&T, bool) -> String + Send + Sync + 'static,
    {
        self.render_option = Some(Arc::new(render));
        self
    }

    /// Create the control.
    ///
    /// Subscribes to `pointer` for outside clicks and arms the first filter
    /// pass on `scheduler`. Both are released when the control is dropped.
    pub fn build(
        self,
        scheduler: Arc<dyn Scheduler>,
        pointer: Arc<dyn PointerEventSource>,
    ) -> Autocomplete<T> {
        let shared = Arc::new(Shared {
            state: Mutex::new(SessionState {
                config: self.config,
                filtered: self.options.clone(),
                options: self.options,
                value: self.value,
                input_text: String::new(),
                popup: PopupState::default(),
                pending: None,
                epoch: 0,
                filter: self.filter,
                text_fn: self.text_fn,
                render_option: self.render_option,
                input_rect: None,
                dropdown_rect: None,
            }),
            scheduler,
            signals: Signals {
                value_changed: Signal::new(),
                input_changed: Signal::new(),
                filtered_changed: Signal::new(),
                filter_failed: Signal::new(),
                open_changed: Signal::new(),
            },
        });

        let weak = Arc::downgrade(&shared);
        let pointer_subscription = pointer.subscribe(Box::new(move |event: &PointerEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_pointer(event);
            }
        }));

        {
            let mut state = shared.state.lock();
            shared.arm_filter(&mut state);
        }

        tracing::debug!(target: targets::AUTOCOMPLETE, "autocomplete created");

        Autocomplete {
            shared,
            pointer,
            pointer_subscription,
        }
    }
}
