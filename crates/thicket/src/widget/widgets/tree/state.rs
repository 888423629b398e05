//! Open, selection and hover state owned by a tree.

use std::collections::HashSet;

use thicket_render::{Point, Size};

use crate::theme::Theme;

use super::node::{NodeShape, RowIndicator};
use super::TreeNodeId;

/// Everything a layout pass reads besides the data callbacks.
///
/// Layout works on a clone so that no state lock is held while caller
/// callbacks run.
#[derive(Debug, Clone, Default)]
pub(crate) struct TreeState {
    pub(crate) root: TreeNodeId,
    pub(crate) open: HashSet<TreeNodeId>,
    pub(crate) selected: Option<TreeNodeId>,
    pub(crate) hovered: Option<TreeNodeId>,
    pub(crate) offset: Point,
    pub(crate) theme: Theme,
    pub(crate) branch_min: Size,
    pub(crate) leaf_min: Size,
}

impl TreeState {
    /// The root is always open.
    pub(crate) fn is_open(&self, uid: &str) -> bool {
        uid == self.root || self.open.contains(uid)
    }

    /// Minimum row size for a shape at depth 0.
    pub(crate) fn row_min(&self, shape: NodeShape) -> Size {
        match shape {
            NodeShape::Branch => self.branch_min,
            NodeShape::Leaf => self.leaf_min,
        }
    }

    pub(crate) fn indicator_for(&self, uid: &str) -> RowIndicator {
        if self.selected.as_deref() == Some(uid) {
            RowIndicator::Selected
        } else if self.hovered.as_deref() == Some(uid) {
            RowIndicator::Hovered
        } else {
            RowIndicator::None
        }
    }
}
