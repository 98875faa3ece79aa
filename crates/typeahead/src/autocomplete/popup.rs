//! Dropdown visibility and keyboard focus.

use serde::Deserialize;

/// How the focused row is reconciled after a filter pass changes the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusAfterFilter {
    /// Keep the focused row, clamped to the last row (or none when empty).
    #[default]
    Clamp,
    /// Always clear focus.
    Reset,
}

/// Open/closed state of the dropdown and the focused row.
///
/// `focused_index` is -1 when no row is focused. The list length is passed
/// into every operation so the state never holds a stale bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupState {
    /// Whether the dropdown is visible.
    pub open: bool,
    /// Keyboard-focused row (-1 means none).
    pub focused_index: i32,
}

impl Default for PopupState {
    fn default() -> Self {
        Self {
            open: false,
            focused_index: -1,
        }
    }
}

impl PopupState {
    /// Set visibility. Returns `true` if it changed.
    pub fn set_open(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }

    /// Flip visibility. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Move focus down one row, wrapping from the last row to the first.
    ///
    /// Does nothing while closed or when the list is empty.
    pub fn focus_next(&mut self, len: usize) -> bool {
        if !self.open || len == 0 {
            return false;
        }
        self.focused_index = (self.focused_index + 1).rem_euclid(len as i32);
        true
    }

    /// Move focus up one row, wrapping from the first row (or none) to the last.
    ///
    /// Does nothing while closed or when the list is empty.
    pub fn focus_previous(&mut self, len: usize) -> bool {
        if !self.open || len == 0 {
            return false;
        }
        self.focused_index = if self.focused_index <= 0 {
            len as i32 - 1
        } else {
            self.focused_index - 1
        };
        true
    }

    /// Focus the row under the pointer.
    pub fn hover(&mut self, row: usize, len: usize) -> bool {
        if !self.open || row >= len {
            return false;
        }
        let changed = self.focused_index != row as i32;
        self.focused_index = row as i32;
        changed
    }

    /// Bring the focused row back in range after the list changed to `len` rows.
    pub fn reconcile(&mut self, len: usize, policy: FocusAfterFilter) {
        self.focused_index = match policy {
            FocusAfterFilter::Reset => -1,
            FocusAfterFilter::Clamp => self.focused_index.min(len as i32 - 1),
        };
    }

    /// The focused row, if it is in range for a list of `len` rows.
    pub fn focused(&self, len: usize) -> Option<usize> {
        usize::try_from(self.focused_index)
            .ok()
            .filter(|&index| index < len)
    }
}
