//! Core canvas object trait.
//!
//! [`CanvasObject`] is the drawable/interactive unit that layout code moves,
//! resizes, hides and refreshes. Painters walk lists of `&dyn CanvasObject`
//! and draw whatever is visible.

use thicket_render::{Point, Rect, Size};

use super::base::WidgetBase;
use crate::theme::Theme;

/// A positioned, sizable, hideable drawable.
///
/// Implementors provide access to their [`WidgetBase`] and a minimum size;
/// everything else has default implementations that delegate to the base.
/// Override [`resize`](Self::resize) when children must be laid out again
/// after a size change, and [`set_theme`](Self::set_theme) when the minimum
/// size depends on theme metrics.
pub trait CanvasObject {
    /// Get a reference to the widget base.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// The size this object should not shrink below.
    fn min_size(&self) -> Size;

    /// Position relative to the parent.
    fn position(&self) -> Point {
        self.widget_base().pos()
    }

    /// Current size.
    fn size(&self) -> Size {
        self.widget_base().size()
    }

    /// Position and size as a rectangle in parent coordinates.
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    /// Move the object to a position relative to its parent.
    fn move_to(&mut self, pos: Point) {
        self.widget_base_mut().set_pos(pos);
    }

    /// Resize the object.
    fn resize(&mut self, size: Size) {
        self.widget_base_mut().set_size(size);
    }

    /// Whether the object is drawn.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Make the object visible.
    fn show(&mut self) {
        self.widget_base_mut().show();
    }

    /// Hide the object.
    fn hide(&mut self) {
        self.widget_base_mut().hide();
    }

    /// Request that the object be redrawn.
    fn refresh(&mut self) {
        self.widget_base_mut().update();
    }

    /// Apply the metrics of the container's theme. Ignored by default.
    fn set_theme(&mut self, _theme: &Theme) {}
}
