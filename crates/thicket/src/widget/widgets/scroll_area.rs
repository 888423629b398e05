//! ScrollArea widget implementation.
//!
//! This module provides [`ScrollArea`], a viewport onto content that may be
//! larger than the visible area. The scroll area only tracks offsets and
//! sizes; whoever owns the content listens to
//! [`offset_changed`](ScrollArea::offset_changed) and lays the content out
//! for the new offset.
//!
//! # Example
//!
//! ```
//! use thicket::render::{Point, Size};
//! use thicket::widget::CanvasObject;
//! use thicket::widget::widgets::ScrollArea;
//!
//! let mut scroll_area = ScrollArea::new();
//! scroll_area.resize(Size::new(200.0, 100.0));
//! scroll_area.set_content_size(Size::new(200.0, 1000.0));
//!
//! scroll_area.offset_changed.connect(|offset| println!("scrolled to {}", offset.y));
//! scroll_area.scroll_by(0.0, 250.0);
//! assert_eq!(scroll_area.offset(), Point::new(0.0, 250.0));
//!
//! // Offsets are clamped to the content
//! scroll_area.set_offset(Point::new(0.0, 5000.0));
//! assert_eq!(scroll_area.offset().y, 900.0);
//! ```

use thicket_core::Signal;
use thicket_render::{Point, Rect, Size};

use crate::widget::{CanvasObject, WidgetBase};

/// Minimum size of a scroll area in either direction.
pub const SCROLL_AREA_MIN_SIZE: Size = Size::new(32.0, 32.0);

/// A scrollable viewport.
///
/// The widget size is the viewport size. The offset is the content
/// coordinate shown at the viewport's top-left corner and always lies in
/// `[0, content - viewport]` on each axis.
///
/// # Signals
///
/// - `offset_changed(Point)`: Emitted when the scroll offset changes
pub struct ScrollArea {
    /// Widget base; its size is the viewport size.
    base: WidgetBase,

    /// Current scroll offset.
    offset: Point,

    /// Content size (total scrollable area).
    content_size: Size,

    /// Emitted when the scroll offset changes.
    pub offset_changed: Signal<Point>,
}

impl Default for ScrollArea {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScrollArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollArea")
            .field("viewport", &self.base.size())
            .field("offset", &self.offset)
            .field("content_size", &self.content_size)
            .finish()
    }
}

impl ScrollArea {
    /// Create a new scroll area with an empty viewport.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            offset: Point::ZERO,
            content_size: Size::ZERO,
            offset_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Offset
    // =========================================================================

    /// Get the current scroll offset.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Set the scroll offset, clamped to the scrollable range.
    ///
    /// Emits `offset_changed` if the clamped offset differs from the current one.
    pub fn set_offset(&mut self, offset: Point) {
        let clamped = self.clamped(offset);
        if clamped != self.offset {
            self.offset = clamped;
            self.base.update();
            self.offset_changed.emit(clamped);
        }
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.set_offset(self.offset.offset(dx, dy));
    }

    /// Scroll back to the top-left corner.
    pub fn scroll_to_top(&mut self) {
        self.set_offset(Point::ZERO);
    }

    /// The largest offset the current content and viewport allow.
    pub fn max_offset(&self) -> Point {
        let viewport = self.viewport_size();
        Point::new(
            (self.content_size.width - viewport.width).max(0.0),
            (self.content_size.height - viewport.height).max(0.0),
        )
    }

    /// Scroll vertically so that the span `[top, top + height]` is visible.
    ///
    /// Scrolls up if the span starts above the viewport, down if it ends
    /// below it, and does nothing if it is already fully visible.
    pub fn ensure_visible_span(&mut self, top: f32, height: f32) {
        let view_top = self.offset.y;
        let view_bottom = view_top + self.viewport_size().height;

        if top < view_top {
            self.set_offset(Point::new(self.offset.x, top));
        } else if top + height > view_bottom {
            self.set_offset(Point::new(
                self.offset.x,
                top + height - self.viewport_size().height,
            ));
        }
    }

    // =========================================================================
    // Sizes
    // =========================================================================

    /// The visible area's size.
    pub fn viewport_size(&self) -> Size {
        self.base.size()
    }

    /// Get the content size.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Set the content size, re-clamping the offset.
    pub fn set_content_size(&mut self, size: Size) {
        if self.content_size != size {
            self.content_size = size;
            self.clamp_offset();
        }
    }

    /// The part of the content currently shown, in content coordinates.
    pub fn visible_content_rect(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.viewport_size())
    }

    fn clamped(&self, offset: Point) -> Point {
        let max = self.max_offset();
        Point::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
    }

    fn clamp_offset(&mut self) {
        self.set_offset(self.offset);
    }
}

impl CanvasObject for ScrollArea {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn min_size(&self) -> Size {
        SCROLL_AREA_MIN_SIZE
    }

    fn resize(&mut self, size: Size) {
        if self.base.size() != size {
            self.base.set_size(size);
            self.clamp_offset();
        }
    }
}
