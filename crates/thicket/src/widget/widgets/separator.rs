//! Separator widget implementation.
//!
//! This module provides [`Separator`], a thin line that visually divides
//! content. The tree view uses horizontal separators as row dividers.
//!
//! # Example
//!
//! ```
//! use thicket::render::{Point, Size};
//! use thicket::widget::CanvasObject;
//! use thicket::widget::widgets::Separator;
//!
//! let mut divider = Separator::new();
//! divider.move_to(Point::new(4.0, 20.0));
//! divider.resize(Size::new(192.0, 1.0));
//! assert_eq!(divider.min_size().height, 1.0);
//! ```

use thicket_render::Size;

use crate::widget::{CanvasObject, WidgetBase};

/// Default separator line thickness.
pub const SEPARATOR_THICKNESS: f32 = 1.0;

/// A visual separator that draws a line to divide content.
#[derive(Debug, Clone)]
pub struct Separator {
    /// Widget base.
    base: WidgetBase,

    /// Line thickness.
    thickness: f32,
}

impl Default for Separator {
    fn default() -> Self {
        Self::new()
    }
}

impl Separator {
    /// Create a separator with the default thickness.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            thickness: SEPARATOR_THICKNESS,
        }
    }

    /// Set the line thickness using builder pattern.
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness.max(0.0);
        self
    }

    /// Get the line thickness.
    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl CanvasObject for Separator {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn min_size(&self) -> Size {
        Size::new(self.thickness, self.thickness)
    }
}
