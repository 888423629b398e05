//! Core systems for Thicket.
//!
//! This crate provides the foundational pieces shared by every Thicket widget:
//!
//! - **Signal/Slot System**: Type-safe notifications from widgets to application code
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets and performance spans used across the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use thicket_core::Signal;
//!
//! // Create a signal that notifies when a branch opens
//! let branch_opened = Signal::<String>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = branch_opened.connect(|uid| {
//!     println!("Opened {uid}");
//! });
//!
//! // Emit the signal
//! branch_opened.emit("docs".to_string());
//!
//! // Disconnect when done
//! branch_opened.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use thicket_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
