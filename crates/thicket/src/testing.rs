//! Headless test backend.
//!
//! [`TestCanvas`] stands in for a window: it hosts a tree at a fixed
//! viewport size and captures what a painter would draw, in viewport
//! coordinates. Each test creates its own canvas; nothing is shared between
//! tests.
//!
//! [`TestRow`] is a fixed-size row template that records its bindings, for
//! checking how often a data source's update callback reached it.
//!
//! # Example
//!
//! ```
//! use thicket::render::Size;
//! use thicket::testing::{PaintedKind, TestCanvas, TestRow};
//! use thicket::widget::widgets::{Tree, TreeData};
//!
//! let tree = Tree::new(
//!     TreeData::new()
//!         .with_child_uids(|uid| match uid {
//!             "" => vec!["a".into(), "b".into()],
//!             _ => Vec::new(),
//!         })
//!         .with_create_node(|_| TestRow::new(Size::new(40.0, 12.0)))
//!         .with_update_node(|uid, _, row: &mut TestRow| row.bind(uid)),
//! );
//!
//! let canvas = TestCanvas::new(Size::new(100.0, 100.0));
//! canvas.host(&tree);
//!
//! let painted = canvas.capture(&tree);
//! let rows: Vec<_> = painted
//!     .iter()
//!     .filter(|p| p.kind == PaintedKind::Leaf)
//!     .filter_map(|p| p.label.as_deref())
//!     .collect();
//! assert_eq!(rows, ["a", "b"]);
//! ```

use thicket_render::{Rect, Size};

use crate::theme::Theme;
use crate::widget::widgets::{NodeShape, Tree, TreeNodeId};
use crate::widget::{CanvasObject, WidgetBase};

/// What kind of object was painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintedKind {
    /// A row divider.
    Divider,
    /// A branch row.
    Branch,
    /// A leaf row.
    Leaf,
}

/// One object a painter would draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedObject {
    /// Object kind.
    pub kind: PaintedKind,
    /// Rectangle in viewport coordinates.
    pub rect: Rect,
    /// The node id for rows.
    pub label: Option<TreeNodeId>,
}

/// A headless stand-in for a window.
#[derive(Debug, Clone)]
pub struct TestCanvas {
    size: Size,
    theme: Theme,
}

impl TestCanvas {
    /// Create a canvas with the default theme.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            theme: Theme::default(),
        }
    }

    /// Set the theme applied to hosted trees using builder pattern.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Get the viewport size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Get the theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply this canvas's theme and size to a tree.
    pub fn host<C>(&self, tree: &Tree<C>)
    where
        C: CanvasObject + Send + 'static,
    {
        tree.set_theme(self.theme);
        tree.resize(self.size);
    }

    /// Capture the visible dividers and rows, top to bottom.
    pub fn capture<C>(&self, tree: &Tree<C>) -> Vec<PaintedObject>
    where
        C: CanvasObject + Send + 'static,
    {
        let offset = tree.offset();
        let viewport = Rect::from_origin_size(offset, self.size);

        let dividers = tree.visible_dividers().into_iter().map(|rect| PaintedObject {
            kind: PaintedKind::Divider,
            rect,
            label: None,
        });
        let rows = tree.rendered_rows().into_iter().map(|row| PaintedObject {
            kind: match row.shape {
                NodeShape::Branch => PaintedKind::Branch,
                NodeShape::Leaf => PaintedKind::Leaf,
            },
            rect: row.rect,
            label: Some(row.uid),
        });

        let mut painted: Vec<PaintedObject> = dividers
            .chain(rows)
            .filter(|p| p.rect.intersects_vertical_span(viewport.top(), viewport.bottom()))
            .map(|p| PaintedObject {
                rect: p.rect.offset(-offset.x, -offset.y),
                ..p
            })
            .collect();
        painted.sort_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));
        painted
    }
}

/// A fixed-size row template that records its bindings.
#[derive(Debug, Clone)]
pub struct TestRow {
    base: WidgetBase,
    min: Size,
    bound: Option<TreeNodeId>,
    bound_count: usize,
}

impl TestRow {
    /// Create a template with a fixed minimum size.
    pub fn new(min: Size) -> Self {
        Self {
            base: WidgetBase::new(),
            min,
            bound: None,
            bound_count: 0,
        }
    }

    /// Record a binding to `uid`.
    pub fn bind(&mut self, uid: &str) {
        self.bound = Some(uid.to_owned());
        self.bound_count += 1;
        self.base.update();
    }

    /// The id most recently bound.
    pub fn bound_uid(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    /// How many times this template was bound.
    pub fn bound_count(&self) -> usize {
        self.bound_count
    }
}

impl CanvasObject for TestRow {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn min_size(&self) -> Size {
        self.min
    }
}
