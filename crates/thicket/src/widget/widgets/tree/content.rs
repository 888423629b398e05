//! The virtualized content renderer.
//!
//! Each pass walks every row on an open path, positions a divider before
//! every row but the first, and materializes only the rows whose vertical
//! span touches the viewport. Rows are cached by node id per shape. Rows
//! that fall out of view go back to their shape's pool before rows coming
//! into view are taken from it, so a pass never constructs a row while a
//! departing one of the same shape is still waiting to be released.

use std::collections::{HashMap, HashSet};

use thicket_core::PerfSpan;
use thicket_core::logging::targets;
use thicket_render::{Point, Rect, Size};

use crate::widget::widgets::Separator;
use crate::widget::{CanvasObject, ObjectPool};

use super::data::TreeData;
use super::node::{NodeShape, RowIndicator, TreeRow};
use super::state::TreeState;
use super::{TREE_DIVIDER_HEIGHT, TreeNodeId};

/// A row that is currently materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// The node the row displays.
    pub uid: TreeNodeId,
    /// Row shape.
    pub shape: NodeShape,
    /// Visual depth.
    pub depth: usize,
    /// Position and size in content coordinates.
    pub rect: Rect,
    /// Current highlight.
    pub indicator: RowIndicator,
    /// Whether a branch row shows the open state.
    pub expanded: bool,
}

/// Where a pointer position lands in the content.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RowHit {
    pub(crate) uid: TreeNodeId,
    pub(crate) on_expander: bool,
}

/// A row the walk decided to materialize.
struct PlannedRow {
    uid: TreeNodeId,
    shape: NodeShape,
    depth: usize,
    top: f32,
    height: f32,
}

/// Bound rows, free rows and construction count for one shape.
struct RowCache<C> {
    shape: NodeShape,
    rows: HashMap<TreeNodeId, TreeRow<C>>,
    pool: ObjectPool<TreeRow<C>>,
    /// Rows bound during the current pass; they already received their update.
    fresh: HashSet<TreeNodeId>,
    constructed: usize,
}

impl<C: CanvasObject> RowCache<C> {
    fn new(shape: NodeShape) -> Self {
        Self {
            shape,
            rows: HashMap::new(),
            pool: ObjectPool::new(),
            fresh: HashSet::new(),
            constructed: 0,
        }
    }

    /// Hide and pool every row whose node is not in `wanted`.
    fn release_except(&mut self, wanted: &HashSet<&str>) -> usize {
        let mut released = 0;
        let previous = std::mem::take(&mut self.rows);
        for (uid, mut row) in previous {
            if wanted.contains(uid.as_str()) {
                self.rows.insert(uid, row);
            } else {
                row.hide();
                self.pool.release(row);
                released += 1;
            }
        }
        released
    }
}

/// Lays out and owns the rows of one tree.
pub(crate) struct TreeContentRenderer<C> {
    /// Size of the scroll container's visible area.
    viewport: Size,
    /// Size assigned to the content by the scroll container.
    size: Size,
    dividers: Vec<Separator>,
    branches: RowCache<C>,
    leaves: RowCache<C>,
}

impl<C: CanvasObject> TreeContentRenderer<C> {
    pub(crate) fn new() -> Self {
        Self {
            viewport: Size::ZERO,
            size: Size::ZERO,
            dividers: Vec::new(),
            branches: RowCache::new(NodeShape::Branch),
            leaves: RowCache::new(NodeShape::Leaf),
        }
    }

    pub(crate) fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn cache(&self, shape: NodeShape) -> &RowCache<C> {
        match shape {
            NodeShape::Branch => &self.branches,
            NodeShape::Leaf => &self.leaves,
        }
    }

    fn cache_mut(&mut self, shape: NodeShape) -> &mut RowCache<C> {
        match shape {
            NodeShape::Branch => &mut self.branches,
            NodeShape::Leaf => &mut self.leaves,
        }
    }

    /// Rows ever constructed for a shape.
    pub(crate) fn constructed(&self, shape: NodeShape) -> usize {
        self.cache(shape).constructed
    }

    /// Rows waiting in a shape's pool.
    pub(crate) fn pooled(&self, shape: NodeShape) -> usize {
        self.cache(shape).pool.len()
    }

    /// Total extent of every row on an open path, ignoring the viewport.
    pub(crate) fn min_size(&self, data: &TreeData<C>, state: &TreeState) -> Size {
        let indent_step = state.theme.indent_step();
        let mut min = Size::ZERO;
        let mut rows = 0usize;
        data.walk(
            &state.root,
            &|uid| state.is_open(uid),
            &mut |_uid, shape, depth| {
                if rows > 0 {
                    min.height += TREE_DIVIDER_HEIGHT;
                }
                rows += 1;
                let row = state.row_min(shape);
                min.width = min.width.max(row.width + depth as f32 * indent_step);
                min.height += row.height;
            },
        );
        min
    }

    /// Run a layout pass, then bring every row in view up to date.
    ///
    /// Each materialized row receives exactly one update per call: rows bound
    /// during layout are updated as they are bound, the rest here.
    pub(crate) fn refresh(&mut self, data: &TreeData<C>, state: &TreeState) {
        self.layout(data, state);
        for cache in [&mut self.branches, &mut self.leaves] {
            let branch = cache.shape.is_branch();
            for (uid, row) in cache.rows.iter_mut() {
                if !cache.fresh.contains(uid) {
                    if let Some(content) = row.node_mut().content_mut() {
                        data.update_node(uid, branch, content);
                    }
                }
                row.node_mut().set_indicator(state.indicator_for(uid));
                row.set_expanded(state.is_open(uid));
                row.refresh();
            }
            cache.fresh.clear();
        }
    }

    /// Update highlights without rebinding any rows.
    pub(crate) fn sync_indicators(&mut self, state: &TreeState) {
        for cache in [&mut self.branches, &mut self.leaves] {
            for (uid, row) in cache.rows.iter_mut() {
                row.node_mut().set_indicator(state.indicator_for(uid));
            }
        }
    }

    fn layout(&mut self, data: &TreeData<C>, state: &TreeState) {
        let _perf = PerfSpan::new("tree_layout");

        let width = self.size.width.max(self.viewport.width);
        let view_top = state.offset.y;
        let view_bottom = view_top + self.viewport.height;

        // Plan: walk the open paths, collecting divider positions and the
        // rows that touch the viewport.
        let mut planned = Vec::new();
        let mut divider_tops = Vec::new();
        let mut y = 0.0f32;
        let mut rows = 0usize;
        data.walk(
            &state.root,
            &|uid| state.is_open(uid),
            &mut |uid, shape, depth| {
                if rows > 0 {
                    divider_tops.push(y);
                    y += TREE_DIVIDER_HEIGHT;
                }
                rows += 1;
                let height = state.row_min(shape).height;
                let span = Rect::new(0.0, y, width, height);
                if span.intersects_vertical_span(view_top, view_bottom) {
                    planned.push(PlannedRow {
                        uid: uid.to_owned(),
                        shape,
                        depth,
                        top: y,
                        height,
                    });
                }
                y += height;
            },
        );

        self.place_dividers(&divider_tops, width, state.theme.padding);

        // Release: rows that left the viewport go back to their pools.
        let released = {
            let wanted_branches: HashSet<&str> = planned
                .iter()
                .filter(|row| row.shape == NodeShape::Branch)
                .map(|row| row.uid.as_str())
                .collect();
            let wanted_leaves: HashSet<&str> = planned
                .iter()
                .filter(|row| row.shape == NodeShape::Leaf)
                .map(|row| row.uid.as_str())
                .collect();
            self.branches.release_except(&wanted_branches)
                + self.leaves.release_except(&wanted_leaves)
        };

        // Materialize: keep cached rows, bind pooled or new rows for the rest.
        let theme = state.theme;
        let mut constructed = 0;
        for plan in &planned {
            let cache = self.cache_mut(plan.shape);
            let branch = plan.shape.is_branch();
            if !cache.rows.contains_key(&plan.uid) {
                let mut row = match cache.pool.obtain() {
                    Some(row) => row,
                    None => {
                        cache.constructed += 1;
                        constructed += 1;
                        TreeRow::new(plan.shape, data.create_node(branch), theme)
                    }
                };
                if let Some(content) = row.node_mut().content_mut() {
                    data.update_node(&plan.uid, branch, content);
                }
                cache.fresh.insert(plan.uid.clone());
                cache.rows.insert(plan.uid.clone(), row);
            }
            if let Some(row) = cache.rows.get_mut(&plan.uid) {
                row.node_mut().bind(&plan.uid, plan.depth);
                row.move_to(Point::new(0.0, plan.top));
                row.resize(Size::new(width, plan.height));
            }
        }

        tracing::trace!(
            target: targets::LAYOUT,
            rows,
            materialized = self.branches.rows.len() + self.leaves.rows.len(),
            released,
            constructed,
            dividers = divider_tops.len(),
            "tree layout pass"
        );
        if released > 0 || constructed > 0 {
            tracing::trace!(
                target: targets::POOL,
                pooled_branches = self.branches.pool.len(),
                pooled_leaves = self.leaves.pool.len(),
                constructed_branches = self.branches.constructed,
                constructed_leaves = self.leaves.constructed,
                "tree row pools changed"
            );
        }
    }

    /// Reuse dividers in order, growing the list as needed and hiding the
    /// surplus.
    fn place_dividers(&mut self, tops: &[f32], width: f32, padding: f32) {
        if self.dividers.len() < tops.len() {
            self.dividers.resize_with(tops.len(), Separator::new);
        }
        let size = Size::new((width - 2.0 * padding).max(0.0), TREE_DIVIDER_HEIGHT);
        for (divider, &top) in self.dividers.iter_mut().zip(tops) {
            divider.move_to(Point::new(padding, top));
            divider.resize(size);
            divider.show();
        }
        for divider in self.dividers.iter_mut().skip(tops.len()) {
            divider.hide();
        }
    }

    /// Dividers then rows, for painting.
    pub(crate) fn objects(&self) -> Vec<&dyn CanvasObject> {
        let mut objects: Vec<&dyn CanvasObject> = Vec::with_capacity(
            self.dividers.len() + self.branches.rows.len() + self.leaves.rows.len(),
        );
        objects.extend(self.dividers.iter().map(|d| d as &dyn CanvasObject));
        objects.extend(self.branches.rows.values().map(|r| r as &dyn CanvasObject));
        objects.extend(self.leaves.rows.values().map(|r| r as &dyn CanvasObject));
        objects
    }

    /// Rectangles of the dividers currently shown.
    pub(crate) fn visible_dividers(&self) -> Vec<Rect> {
        self.dividers
            .iter()
            .filter(|d| d.is_visible())
            .map(CanvasObject::geometry)
            .collect()
    }

    /// Materialized rows sorted top to bottom.
    pub(crate) fn rendered_rows(&self) -> Vec<RenderedRow> {
        let mut rows: Vec<RenderedRow> = self
            .branches
            .rows
            .values()
            .chain(self.leaves.rows.values())
            .map(|row| RenderedRow {
                uid: row.node().uid().to_owned(),
                shape: row.shape(),
                depth: row.node().depth(),
                rect: row.geometry(),
                indicator: row.node().indicator(),
                expanded: row.is_expanded(),
            })
            .collect();
        rows.sort_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));
        rows
    }

    /// Find the row under a point in content coordinates.
    pub(crate) fn hit_test(&self, point: Point) -> Option<RowHit> {
        self.branches
            .rows
            .values()
            .chain(self.leaves.rows.values())
            .find(|row| row.is_visible() && row.geometry().contains(point))
            .map(|row| {
                let local = point - row.position();
                RowHit {
                    uid: row.node().uid().to_owned(),
                    on_expander: row.expander_contains(local),
                }
            })
    }

    /// Drop every row, pool and divider.
    ///
    /// Rows keep the theme they were built with, so a theme change has to
    /// start over.
    pub(crate) fn reset(&mut self) {
        self.dividers.clear();
        self.branches = RowCache::new(NodeShape::Branch);
        self.leaves = RowCache::new(NodeShape::Leaf);
        tracing::debug!(target: targets::POOL, "tree row caches reset");
    }
}
