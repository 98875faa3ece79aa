//! Logging facilities for Typeahead.
//!
//! Typeahead uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("typeahead=debug,typeahead_core=trace")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```

/// Span names used throughout Typeahead for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Debounced filter pass span.
    pub const FILTER_PASS: &str = "typeahead::filter_pass";
    /// Selection commit span.
    pub const COMMIT: &str = "typeahead::commit";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "typeahead_core";
    /// Scheduled task target.
    pub const SCHEDULER: &str = "typeahead_core::scheduler";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "typeahead_core::signal";
    /// Pointer event bus target.
    pub const POINTER: &str = "typeahead_core::pointer";
    /// Autocomplete control target.
    pub const AUTOCOMPLETE: &str = "typeahead::autocomplete";
}
