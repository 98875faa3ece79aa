//! Candidate filtering.
//!
//! The default filter keeps every option whose text starts with the query,
//! ignoring letter case, and preserves option order. A custom filter replaces
//! it completely and its output is used verbatim.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Produces the display text of an option.
pub type TextFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A custom filter: `(query, options) -> matches`.
pub type FilterFn<T> = Arc<dyn Fn(&str, &[T]) -> Result<Vec<T>, FilterError> + Send + Sync>;

/// Why a custom filter produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The filter returned an error.
    #[error("Filter rejected query '{query}': {message}")]
    Rejected { query: String, message: String },

    /// The filter panicked.
    #[error("Filter panicked on query '{query}': {message}")]
    Panicked { query: String, message: String },
}

impl FilterError {
    /// Create a rejection error. Custom filters return this to signal failure.
    pub fn rejected(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            query: query.into(),
            message: message.into(),
        }
    }

    /// The query the filter was running on.
    pub fn query(&self) -> &str {
        match self {
            Self::Rejected { query, .. } | Self::Panicked { query, .. } => query,
        }
    }
}

/// Case-insensitive prefix match over `options`.
///
/// An empty query matches everything. Relative order is preserved.
pub fn prefix_filter<T, F>(query: &str, options: &[T], text: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    if query.is_empty() {
        return options.to_vec();
    }

    let query_lower = query.to_lowercase();
    options
        .iter()
        .filter(|option| text(option).to_lowercase().starts_with(&query_lower))
        .cloned()
        .collect()
}

/// Run one filter pass.
///
/// Uses `custom` when present, otherwise [`prefix_filter`]. A panicking
/// custom filter is reported as [`FilterError::Panicked`].
pub(crate) fn compute_filtered<T: Clone>(
    query: &str,
    options: &[T],
    custom: Option<&FilterFn<T>>,
    text: &TextFn<T>,
) -> Result<Vec<T>, FilterError> {
    let Some(custom) = custom else {
        return Ok(prefix_filter(query, options, |option| text(option)));
    };

    match panic::catch_unwind(AssertUnwindSafe(|| custom(query, options))) {
        Ok(result) => result,
        Err(payload) => Err(FilterError::Panicked {
            query: query.to_string(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
