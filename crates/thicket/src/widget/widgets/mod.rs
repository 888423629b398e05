//! Standard widgets for Thicket.
//!
//! This module provides the widgets the tree view is built from:
//!
//! - [`Tree`]: Virtualized view of callback-defined hierarchical data
//! - [`ScrollArea`]: Viewport with a clamped scroll offset
//! - [`Label`]: Single line of text
//! - [`Separator`]: Thin dividing line

mod label;
mod scroll_area;
mod separator;
mod tree;

pub use label::Label;
pub use scroll_area::{SCROLL_AREA_MIN_SIZE, ScrollArea};
pub use separator::{SEPARATOR_THICKNESS, Separator};
pub use tree::{
    FlattenedRow, NodeShape, RenderedRow, RowIndicator, TREE_DIVIDER_HEIGHT, Tree, TreeData,
    TreeNode, TreeNodeId, TreeRow,
};
