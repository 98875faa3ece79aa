//! The snapshot handed to whatever draws the control.
//!
//! The control does not render anything itself. [`Autocomplete::view`]
//! returns an [`AutocompleteView`] describing what should be on screen, and
//! a row's label comes from the caller's [`RenderOption`] callback when one
//! is installed.
//!
//! [`Autocomplete::view`]: super::Autocomplete::view

use std::sync::Arc;

/// Renders a row: `(option, is_selected) -> label`.
pub type RenderOption<T> = Arc<dyn Fn(&T, bool) -> String + Send + Sync>;

/// Everything a renderer needs to draw the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteView {
    /// Caption above the input.
    pub label: String,
    /// Help text below the input.
    pub description: String,
    /// Shown while the input is empty.
    pub placeholder: String,
    /// Current input text.
    pub input_text: String,
    /// Draw the control greyed out.
    pub disabled: bool,
    /// Show a busy indicator next to the input.
    pub loading: bool,
    /// Whether the dropdown is visible.
    pub open: bool,
    /// Dropdown contents.
    pub dropdown: DropdownView,
}

/// The dropdown part of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownView {
    /// The dropdown is closed.
    Hidden,
    /// The dropdown is open but nothing matches.
    NoResults,
    /// The dropdown is open with matching rows.
    Rows(Vec<RowView>),
}

impl DropdownView {
    /// The visible rows, empty unless [`DropdownView::Rows`].
    pub fn rows(&self) -> &[RowView] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Position in the filtered list.
    pub index: usize,
    /// Rendered label.
    pub label: String,
    /// Keyboard/hover focus.
    pub focused: bool,
    /// Part of the owner's current value.
    pub selected: bool,
    /// Draw a checkbox (multi-select).
    pub checkbox: bool,
}

impl AutocompleteView {
    /// Labels of the visible rows, in order.
    pub fn row_labels(&self) -> Vec<&str> {
        self.dropdown
            .rows()
            .iter()
            .map(|row| row.label.as_str())
            .collect()
    }

    /// The focused row, if any.
    pub fn focused_row(&self) -> Option<&RowView> {
        self.dropdown.rows().iter().find(|row| row.focused)
    }
}
