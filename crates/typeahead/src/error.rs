//! Error types for the Typeahead controls.

use typeahead_core::CoreError;

use crate::autocomplete::FilterError;

/// Result type alias for control operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving a control.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be parsed.
    #[error("Invalid autocomplete configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A custom filter failed.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The scheduler rejected an operation.
    #[error(transparent)]
    Scheduler(#[from] CoreError),
}
