//! Tree widget implementation.
//!
//! This module provides [`Tree`], a virtualized view of hierarchical data.
//! The hierarchy is never stored: it is described by the callbacks of a
//! [`TreeData`] and walked again on every layout pass. Only rows that touch
//! the visible area are materialized, and rows leaving the view are pooled
//! and rebound as other rows come into view.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use thicket::render::Size;
//! use thicket::widget::widgets::Tree;
//!
//! let mut data = HashMap::new();
//! data.insert(String::new(), vec!["docs".to_string(), "README".to_string()]);
//! data.insert("docs".to_string(), vec!["guide.md".to_string()]);
//!
//! let tree = Tree::with_strings(data);
//! tree.branch_opened().connect(|uid| println!("opened {uid}"));
//! tree.resize(Size::new(300.0, 200.0));
//!
//! tree.open_branch("docs");
//! let uids: Vec<_> = tree.flattened_rows().into_iter().map(|row| row.uid).collect();
//! assert_eq!(uids, ["docs", "guide.md", "README"]);
//! ```
//!
//! # Signals
//!
//! - `branch_opened(TreeNodeId)`: A branch was opened
//! - `branch_closed(TreeNodeId)`: A branch was closed
//! - `selected(TreeNodeId)`: A node became the selection
//! - `unselected(TreeNodeId)`: A node stopped being the selection

mod content;
mod data;
mod node;
mod state;


use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thicket_core::logging::targets;
use thicket_core::{Property, Signal};
use thicket_render::{Point, Rect, Size};

use crate::widget::CanvasObject;
use crate::widget::widgets::{Label, ScrollArea, SCROLL_AREA_MIN_SIZE};

pub use content::RenderedRow;
pub use data::TreeData;
pub use node::{NodeShape, RowIndicator, TreeNode, TreeRow};

use content::TreeContentRenderer;
use state::TreeState;

use crate::theme::Theme;

/// Identifier of a tree node, chosen by the data source.
///
/// Ids are cache keys, so the data source must keep them unique. The empty
/// id is the default root.
pub type TreeNodeId = String;

/// Height of the divider drawn between consecutive rows.
pub const TREE_DIVIDER_HEIGHT: f32 = 1.0;

/// One row of the open tree, in walk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedRow {
    /// The node id.
    pub uid: TreeNodeId,
    /// Row shape.
    pub shape: NodeShape,
    /// Visual depth; rows directly under a transparent root are at 0.
    pub depth: usize,
}

struct TreeInner<C> {
    data: TreeData<C>,
    size: Property<Size>,
    state: RwLock<TreeState>,
    // Lock order: scroller, content, state.
    scroller: Mutex<ScrollArea>,
    content: Mutex<TreeContentRenderer<C>>,
    branch_opened: Signal<TreeNodeId>,
    branch_closed: Signal<TreeNodeId>,
    selected: Signal<TreeNodeId>,
    unselected: Signal<TreeNodeId>,
}

/// A virtualized tree view.
///
/// `Tree` is a cheap handle: clones refer to the same widget. Row content is
/// any [`CanvasObject`] produced by the data source's template factory.
///
/// Data callbacks and the closure given to [`with_objects`](Self::with_objects)
/// run while the tree's renderer is locked and must not call back into the
/// same tree. Signal slots run with no tree lock held and may
/// call any tree method.
pub struct Tree<C> {
    inner: Arc<TreeInner<C>>,
}

impl<C> Clone for Tree<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> std::fmt::Debug for Tree<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Tree")
            .field("root", &state.root)
            .field("open", &state.open.len())
            .field("selected", &state.selected)
            .field("size", &self.inner.size.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(Tree<Label>: Send, Sync, Clone);

impl Tree<Label> {
    /// Create a tree over a map from node id to child ids.
    ///
    /// A node is a branch exactly when it has an entry in the map, so the
    /// map needs an entry for the root (the empty id by default). Rows are
    /// labels showing the node id.
    pub fn with_strings(data: HashMap<TreeNodeId, Vec<TreeNodeId>>) -> Self {
        let data = Arc::new(data);
        let children = Arc::clone(&data);
        Self::new(
            TreeData::new()
                .with_child_uids(move |uid| children.get(uid).cloned().unwrap_or_default())
                .with_is_branch(move |uid| data.contains_key(uid))
                .with_create_node(|_branch| Label::new("Template Object"))
                .with_update_node(|uid, _branch, label: &mut Label| label.set_text(uid)),
        )
    }
}

impl<C> Tree<C>
where
    C: CanvasObject + Send + 'static,
{
    /// Create a tree over a data source.
    pub fn new(data: TreeData<C>) -> Self {
        let inner = Arc::new(TreeInner {
            data,
            size: Property::new(Size::ZERO),
            state: RwLock::new(TreeState::default()),
            scroller: Mutex::new(ScrollArea::new()),
            content: Mutex::new(TreeContentRenderer::new()),
            branch_opened: Signal::new(),
            branch_closed: Signal::new(),
            selected: Signal::new(),
            unselected: Signal::new(),
        });

        let weak = Arc::downgrade(&inner);
        inner.scroller.lock().offset_changed.connect(move |offset| {
            if let Some(inner) = weak.upgrade() {
                Tree { inner }.on_offset_changed(*offset);
            }
        });

        let tree = Self { inner };
        tree.update_min_sizes();
        tree
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Emitted after a branch is marked open, before the tree re-lays out.
    pub fn branch_opened(&self) -> &Signal<TreeNodeId> {
        &self.inner.branch_opened
    }

    /// Emitted after a branch is marked closed, before the tree re-lays out.
    pub fn branch_closed(&self) -> &Signal<TreeNodeId> {
        &self.inner.branch_closed
    }

    /// Emitted when a node becomes the selection.
    pub fn selected(&self) -> &Signal<TreeNodeId> {
        &self.inner.selected
    }

    /// Emitted when a node stops being the selection.
    pub fn unselected(&self) -> &Signal<TreeNodeId> {
        &self.inner.unselected
    }

    // =========================================================================
    // Branches
    // =========================================================================

    /// Check if a branch is open. The root is always open.
    pub fn is_branch_open(&self, uid: &str) -> bool {
        self.inner.state.read().is_open(uid)
    }

    /// Open a branch and re-lay out.
    pub fn open_branch(&self, uid: &str) {
        self.inner.state.write().open.insert(uid.to_owned());
        tracing::debug!(target: targets::TREE, uid, "branch opened");
        self.inner.branch_opened.emit(uid.to_owned());
        self.refresh();
    }

    /// Close a branch and re-lay out.
    pub fn close_branch(&self, uid: &str) {
        self.inner.state.write().open.remove(uid);
        tracing::debug!(target: targets::TREE, uid, "branch closed");
        self.inner.branch_closed.emit(uid.to_owned());
        self.refresh();
    }

    /// Open a closed branch or close an open one.
    pub fn toggle_branch(&self, uid: &str) {
        if self.is_branch_open(uid) {
            self.close_branch(uid);
        } else {
            self.open_branch(uid);
        }
    }

    /// Open every branch reachable from the root. No signals are emitted.
    pub fn open_all_branches(&self) {
        let root = self.inner.state.read().root.clone();
        let mut branches = Vec::new();
        self.inner.data.walk(&root, &|_| true, &mut |uid, shape, _| {
            if shape.is_branch() {
                branches.push(uid.to_owned());
            }
        });
        tracing::debug!(target: targets::TREE, count = branches.len(), "opening all branches");
        self.inner.state.write().open.extend(branches);
        self.refresh();
    }

    /// Close every branch. No signals are emitted.
    pub fn close_all_branches(&self) {
        self.inner.state.write().open.clear();
        tracing::debug!(target: targets::TREE, "closed all branches");
        self.refresh();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Get the selected node, if any.
    pub fn selection(&self) -> Option<TreeNodeId> {
        self.inner.state.read().selected.clone()
    }

    /// Make `uid` the selection, scrolling it into view.
    ///
    /// Selecting the current selection does nothing. Otherwise the previous
    /// selection is reported through `unselected` before `selected` fires for
    /// the new one. A node that is not on an open path is selected without
    /// scrolling.
    pub fn select(&self, uid: &str) {
        let previous = {
            let mut state = self.inner.state.write();
            if state.selected.as_deref() == Some(uid) {
                return;
            }
            state.selected.replace(uid.to_owned())
        };
        tracing::debug!(target: targets::TREE, uid, previous = ?previous, "selection changed");
        if let Some(previous) = previous {
            self.inner.unselected.emit(previous);
        }
        self.scroll_into_view(uid);
        self.refresh();
        self.inner.selected.emit(uid.to_owned());
    }

    /// Clear the selection.
    ///
    /// Does nothing if nothing is selected. Otherwise `unselected` fires with
    /// `uid`.
    pub fn unselect(&self, uid: &str) {
        if self.inner.state.write().selected.take().is_none() {
            return;
        }
        tracing::debug!(target: targets::TREE, uid, "selection cleared");
        self.refresh();
        self.inner.unselected.emit(uid.to_owned());
    }

    /// Scroll so that the row for `uid` is fully visible.
    fn scroll_into_view(&self, uid: &str) {
        let Some((top, height)) = self.row_span(uid) else {
            // TODO: open the node's ancestors so it can be scrolled to
            tracing::debug!(target: targets::TREE, uid, "selected node is not on an open path");
            return;
        };
        let mut scroller = self.inner.scroller.lock();
        {
            let content = self.inner.content.lock();
            let state = self.inner.state.read();
            let content_size = content
                .min_size(&self.inner.data, &state)
                .max(scroller.viewport_size());
            scroller.offset_changed.set_blocked(true);
            scroller.set_content_size(content_size);
            scroller.offset_changed.set_blocked(false);
        }
        scroller.ensure_visible_span(top, height);
    }

    /// Top edge and height of a row in content coordinates.
    fn row_span(&self, uid: &str) -> Option<(f32, f32)> {
        let state = self.inner.state.read();
        let mut y = 0.0f32;
        let mut rows = 0usize;
        let mut span = None;
        self.inner.data.walk(
            &state.root,
            &|id| state.is_open(id),
            &mut |id, shape, _| {
                if span.is_some() {
                    return;
                }
                if rows > 0 {
                    y += TREE_DIVIDER_HEIGHT;
                }
                rows += 1;
                let height = state.row_min(shape).height;
                if id == uid {
                    span = Some((y, height));
                }
                y += height;
            },
        );
        span
    }

    // =========================================================================
    // Geometry and appearance
    // =========================================================================

    /// Get the tree's size.
    pub fn size(&self) -> Size {
        self.inner.size.get()
    }

    /// Resize the tree. Does nothing if the size is unchanged.
    pub fn resize(&self, size: Size) {
        if self.inner.size.set(size) {
            self.refresh();
        }
    }

    /// The smallest size that still shows a whole row and the scroll
    /// container.
    pub fn min_size(&self) -> Size {
        let state = self.inner.state.read();
        SCROLL_AREA_MIN_SIZE.max(state.branch_min).max(state.leaf_min)
    }

    /// Get the root node id.
    pub fn root(&self) -> TreeNodeId {
        self.inner.state.read().root.clone()
    }

    /// Change the root. A non-empty root is shown as a row.
    pub fn set_root(&self, root: impl Into<TreeNodeId>) {
        self.inner.state.write().root = root.into();
        self.refresh();
    }

    /// Get the theme used for row metrics.
    pub fn theme(&self) -> Theme {
        self.inner.state.read().theme
    }

    /// Change the theme. Cached and pooled rows are discarded.
    pub fn set_theme(&self, theme: Theme) {
        {
            let mut state = self.inner.state.write();
            if state.theme == theme {
                return;
            }
            state.theme = theme;
        }
        self.inner.content.lock().reset();
        self.update_min_sizes();
        if !self.size().is_zero() {
            self.refresh();
        }
    }

    /// Re-measure rows and lay the content out again.
    ///
    /// A tree that has not been given a size yet takes its minimum size.
    pub fn refresh(&self) {
        self.update_min_sizes();
        if self.size().is_zero() {
            self.resize(self.min_size());
        } else {
            self.refresh_content();
        }
    }

    fn update_min_sizes(&self) {
        let theme = self.inner.state.read().theme;
        let measure = |shape: NodeShape| {
            let content = self.inner.data.create_node(shape.is_branch());
            TreeRow::new(shape, content, theme).min_size()
        };
        let branch_min = measure(NodeShape::Branch);
        let leaf_min = measure(NodeShape::Leaf);

        let mut state = self.inner.state.write();
        state.branch_min = branch_min;
        state.leaf_min = leaf_min;
    }

    fn refresh_content(&self) {
        let size = self.size();
        let mut scroller = self.inner.scroller.lock();
        let mut content = self.inner.content.lock();

        let content_min = {
            let state = self.inner.state.read();
            content.min_size(&self.inner.data, &state)
        };
        let content_size = content_min.max(size);

        // The offset is synced by hand below, with the content already locked.
        scroller.offset_changed.set_blocked(true);
        scroller.resize(size);
        scroller.set_content_size(content_size);
        scroller.offset_changed.set_blocked(false);

        self.inner.state.write().offset = scroller.offset();
        drop(scroller);

        content.set_viewport(size);
        content.set_size(content_size);
        let state = self.inner.state.read();
        content.refresh(&self.inner.data, &state);
    }

    fn on_offset_changed(&self, offset: Point) {
        {
            let mut state = self.inner.state.write();
            if state.offset == offset {
                return;
            }
            state.offset = offset;
        }
        tracing::trace!(target: targets::TREE, y = offset.y, "scrolled");
        let mut content = self.inner.content.lock();
        let state = self.inner.state.read();
        content.refresh(&self.inner.data, &state);
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Get the current scroll offset.
    pub fn offset(&self) -> Point {
        self.inner.state.read().offset
    }

    /// Scroll to an offset, clamped to the content.
    pub fn scroll_to(&self, offset: Point) {
        self.inner.scroller.lock().set_offset(offset);
    }

    /// Scroll vertically by a relative amount.
    pub fn scroll_by(&self, dy: f32) {
        self.inner.scroller.lock().scroll_by(0.0, dy);
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Handle a tap at a point in tree coordinates.
    ///
    /// A tap on a branch's expander toggles it; a tap anywhere else on a row
    /// selects the row's node.
    pub fn tapped(&self, point: Point) {
        let Some(hit) = self.hit_test(point) else {
            return;
        };
        if hit.on_expander {
            self.toggle_branch(&hit.uid);
        } else {
            self.select(&hit.uid);
        }
    }

    /// Track the pointer for hover highlighting.
    pub fn mouse_moved(&self, point: Point) {
        let hovered = self.hit_test(point).map(|hit| hit.uid);
        self.set_hovered(hovered);
    }

    /// The pointer left the tree.
    pub fn mouse_out(&self) {
        self.set_hovered(None);
    }

    fn hit_test(&self, point: Point) -> Option<content::RowHit> {
        let offset = self.offset();
        let point = Point::new(point.x + offset.x, point.y + offset.y);
        self.inner.content.lock().hit_test(point)
    }

    fn set_hovered(&self, hovered: Option<TreeNodeId>) {
        let mut content = self.inner.content.lock();
        {
            let mut state = self.inner.state.write();
            if state.hovered == hovered {
                return;
            }
            state.hovered = hovered;
        }
        let state = self.inner.state.read();
        content.sync_indicators(&state);
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Every row on an open path in walk order, whether in view or not.
    pub fn flattened_rows(&self) -> Vec<FlattenedRow> {
        let state = self.inner.state.read();
        let mut rows = Vec::new();
        self.inner.data.walk(
            &state.root,
            &|uid| state.is_open(uid),
            &mut |uid, shape, depth| {
                rows.push(FlattenedRow {
                    uid: uid.to_owned(),
                    shape,
                    depth,
                });
            },
        );
        rows
    }

    /// Materialized rows sorted top to bottom, in content coordinates.
    pub fn rendered_rows(&self) -> Vec<RenderedRow> {
        self.inner.content.lock().rendered_rows()
    }

    /// Rectangles of the dividers currently shown, in content coordinates.
    pub fn visible_dividers(&self) -> Vec<Rect> {
        self.inner.content.lock().visible_dividers()
    }

    /// Call `f` with the content's drawables: dividers first, then rows.
    ///
    /// Pooled rows are not included but hidden dividers are; check
    /// visibility before painting. The renderer stays locked while `f`
    /// runs, so `f` must not call back into the tree.
    pub fn with_objects<R>(&self, f: impl FnOnce(&[&dyn CanvasObject]) -> R) -> R {
        let content = self.inner.content.lock();
        f(&content.objects())
    }

    /// Total extent of the open tree.
    pub fn content_min_size(&self) -> Size {
        let content = self.inner.content.lock();
        let state = self.inner.state.read();
        content.min_size(&self.inner.data, &state)
    }

    /// Minimum size of a top-level row of a shape.
    pub fn row_min_size(&self, shape: NodeShape) -> Size {
        self.inner.state.read().row_min(shape)
    }

    /// Rows ever constructed for a shape.
    pub fn constructed_rows(&self, shape: NodeShape) -> usize {
        self.inner.content.lock().constructed(shape)
    }

    /// Rows waiting for reuse in a shape's pool.
    pub fn pooled_rows(&self, shape: NodeShape) -> usize {
        self.inner.content.lock().pooled(shape)
    }
}
