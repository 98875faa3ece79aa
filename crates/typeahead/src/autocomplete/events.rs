//! Input events delivered to an autocomplete control by its host.

/// Keys the control reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move focus to the previous row, wrapping to the last.
    ArrowUp,
    /// Move focus to the next row, wrapping to the first.
    ArrowDown,
    /// Commit the focused row.
    Enter,
    /// Close the dropdown.
    Escape,
    /// Any other key. Ignored.
    Other,
}

/// A user interaction with the control.
///
/// Rows are addressed by their index in the currently visible list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteEvent {
    /// The input text changed to the given full contents.
    TextChanged(String),
    /// The input field was clicked.
    InputClicked,
    /// A key was pressed while the input had focus.
    KeyPress(Key),
    /// A mouse button was pressed on a row.
    RowPointerDown(usize),
    /// The pointer entered a row.
    RowMouseEnter(usize),
    /// A row's checkbox was toggled (multi-select only).
    RowCheckboxToggled(usize),
}

impl AutocompleteEvent {
    /// Shorthand for [`AutocompleteEvent::TextChanged`].
    pub fn text(raw: impl Into<String>) -> Self {
        Self::TextChanged(raw.into())
    }
}
