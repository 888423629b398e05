//! Geometry primitives for Thicket.
//!
//! Every canvas object, layout pass and painter in Thicket speaks in these
//! types. They carry no rendering state of their own; backends that actually
//! draw pixels live outside this crate.
//!
//! # Example
//!
//! ```
//! use thicket_render::{Point, Rect, Size};
//!
//! let row = Rect::from_origin_size(Point::new(0.0, 42.0), Size::new(200.0, 20.0));
//! assert!(row.intersects_vertical_span(50.0, 250.0));
//! assert_eq!(row.bottom(), 62.0);
//! ```

mod types;

pub use types::{Point, Rect, Size};
