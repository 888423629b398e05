//! Canvas object system for Thicket.
//!
//! This module provides the pieces every drawable is built from:
//!
//! - [`CanvasObject`] trait: Position, size, visibility and minimum size
//! - [`WidgetBase`]: Common implementation of that state
//! - [`ObjectPool`]: Free-list recycling for objects that scroll in and out
//!   of view
//!
//! # Creating a Canvas Object
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement the `CanvasObject` trait
//! 3. Provide `min_size()` for layout
//! 4. Override `resize()` if children must follow the object's size
//!
//! ```
//! use thicket::render::{Point, Size};
//! use thicket::widget::{CanvasObject, WidgetBase};
//!
//! struct Badge {
//!     base: WidgetBase,
//!     count: u32,
//! }
//!
//! impl CanvasObject for Badge {
//!     fn widget_base(&self) -> &WidgetBase { &self.base }
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
//!
//!     fn min_size(&self) -> Size {
//!         let digits = self.count.to_string().len() as f32;
//!         Size::new(8.0 * digits + 8.0, 16.0)
//!     }
//! }
//!
//! let mut badge = Badge { base: WidgetBase::new(), count: 120 };
//! badge.move_to(Point::new(10.0, 10.0));
//! badge.resize(badge.min_size());
//! assert_eq!(badge.geometry().right(), 42.0);
//! ```
//!
//! # Coordinate Systems
//!
//! Positions are relative to the parent. Tree rows are positioned in
//! content coordinates, where `y = 0` is the top of the first row
//! regardless of the scroll offset.

mod base;
mod pool;
mod traits;
pub mod widgets;

pub use base::WidgetBase;
pub use pool::ObjectPool;
pub use traits::CanvasObject;

// Re-export widgets for convenience
pub use widgets::{Label, ScrollArea, Separator, Tree, TreeData, TreeNodeId};
