//! Logging and profiling facilities for Thicket.
//!
//! Thicket uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("thicket::tree=debug,thicket::tree::layout=trace")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Layout passes are wrapped in a [`PerfSpan`] so their duration shows up in
//! any span-aware subscriber.

/// Span names used throughout Thicket for tracing.
pub mod span_names {
    /// Performance span wrapping timed operations.
    pub const PERF: &str = "thicket::perf";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "thicket_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "thicket_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "thicket_core::property";
    /// Tree widget state changes (open/close, selection, scrolling).
    pub const TREE: &str = "thicket::tree";
    /// Tree layout passes.
    pub const LAYOUT: &str = "thicket::tree::layout";
    /// Object pool reuse.
    pub const POOL: &str = "thicket::pool";
    /// Theme and configuration loading.
    pub const THEME: &str = "thicket::theme";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// This is useful for tracking the duration of operations such as layout
/// passes.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "thicket::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
