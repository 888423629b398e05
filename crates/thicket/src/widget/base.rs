//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the common state shared by every canvas
//! object: geometry, visibility and the repaint request that painters consume.

use thicket_render::{Point, Rect, Size};

/// The base implementation for all canvas objects.
///
/// Canvas object implementations include this as a field and delegate common
/// operations to it through [`CanvasObject`](super::CanvasObject).
///
/// # Example
///
/// ```
/// use thicket::render::Size;
/// use thicket::widget::{CanvasObject, WidgetBase};
///
/// struct Swatch {
///     base: WidgetBase,
/// }
///
/// impl CanvasObject for Swatch {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///     fn min_size(&self) -> Size { Size::new(16.0, 16.0) }
/// }
///
/// let mut swatch = Swatch { base: WidgetBase::new() };
/// swatch.resize(Size::new(32.0, 32.0));
/// assert!(swatch.widget_base().needs_repaint());
/// ```
#[derive(Debug, Clone)]
pub struct WidgetBase {
    /// The widget's geometry (position relative to parent and size).
    geometry: Rect,

    /// Whether the widget is visible.
    visible: bool,

    /// Whether the widget needs to be repainted.
    needs_repaint: bool,

    /// Number of repaint requests made over the widget's lifetime.
    repaint_requests: u64,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBase {
    /// Create a new, visible widget base with empty geometry.
    pub fn new() -> Self {
        Self {
            geometry: Rect::ZERO,
            visible: true,
            needs_repaint: true,
            repaint_requests: 0,
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the widget's geometry (position and size).
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the widget's geometry.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.update();
        }
    }

    /// Get the widget's position relative to its parent.
    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// Set the widget's position relative to its parent.
    pub fn set_pos(&mut self, pos: Point) {
        if self.geometry.origin != pos {
            self.geometry.origin = pos;
            self.update();
        }
    }

    /// Get the widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Set the widget's size.
    pub fn set_size(&mut self, size: Size) {
        if self.geometry.size != size {
            self.geometry.size = size;
            self.update();
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check if the widget is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the widget's visibility.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.update();
        }
    }

    /// Show the widget.
    pub fn show(&mut self) {
        self.set_visible(true);
    }

    /// Hide the widget.
    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    // =========================================================================
    // Repainting
    // =========================================================================

    /// Request a repaint of the widget.
    pub fn update(&mut self) {
        self.needs_repaint = true;
        self.repaint_requests += 1;
    }

    /// Check if the widget has a pending repaint request.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Acknowledge the pending repaint request, returning whether there was one.
    ///
    /// Painters call this after drawing the widget.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::replace(&mut self.needs_repaint, false)
    }

    /// Total number of repaint requests made so far.
    #[inline]
    pub fn repaint_requests(&self) -> u64 {
        self.repaint_requests
    }
}
