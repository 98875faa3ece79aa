//! Scalar settings for an autocomplete control.
//!
//! Settings can be built in code with the `with_*` methods or loaded from
//! TOML. Every field is optional in TOML; missing fields take their defaults.
//!
//! ```
//! use typeahead::AutocompleteConfig;
//!
//! let config = AutocompleteConfig::from_toml_str(r#"
//!     label = "Fruit"
//!     multiple = true
//!     debounce_ms = 100
//! "#).unwrap();
//!
//! assert!(config.multiple);
//! assert_eq!(config.debounce_time().as_millis(), 100);
//! assert_eq!(config.placeholder, "");
//! ```

use std::time::Duration;

use serde::Deserialize;

use super::popup::FocusAfterFilter;
use crate::error::Result;

/// Default quiet period before a filter pass, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Scalar configuration for [`Autocomplete`](super::Autocomplete).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Allow selecting several options.
    pub multiple: bool,
    /// Quiet period after the last change before filtering.
    pub debounce_ms: u64,
    /// Ignore all user interaction.
    pub disabled: bool,
    /// Show a busy indicator.
    pub loading: bool,
    /// Label shown above the input.
    pub label: String,
    /// Help text shown below the input.
    pub description: String,
    /// Placeholder shown in an empty input.
    pub placeholder: String,
    /// Close the dropdown after a single-select commit.
    pub close_on_select: bool,
    /// Clear the input text after a single-select commit.
    pub clear_input_on_select: bool,
    /// Focus handling after a filter pass.
    pub focus_after_filter: FocusAfterFilter,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            disabled: false,
            loading: false,
            label: String::new(),
            description: String::new(),
            placeholder: String::new(),
            close_on_select: false,
            clear_input_on_select: false,
            focus_after_filter: FocusAfterFilter::default(),
        }
    }
}

impl AutocompleteConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// The debounce delay as a [`Duration`].
    pub fn debounce_time(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    // =========================================================================
    // Builder Pattern Methods
    // =========================================================================

    /// Set multi-select mode using builder pattern.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set the debounce delay using builder pattern.
    pub fn with_debounce_time(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the loading flag using builder pattern.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set the label using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the description using builder pattern.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the placeholder using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Close the dropdown after a single-select commit.
    pub fn with_close_on_select(mut self, close: bool) -> Self {
        self.close_on_select = close;
        self
    }

    /// Clear the input after a single-select commit.
    pub fn with_clear_input_on_select(mut self, clear: bool) -> Self {
        self.clear_input_on_select = clear;
        self
    }

    /// Set focus handling after filter passes using builder pattern.
    pub fn with_focus_after_filter(mut self, policy: FocusAfterFilter) -> Self {
        self.focus_after_filter = policy;
        self
    }
}
