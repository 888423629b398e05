//! Tree rows: the pooled drawables the content renderer positions.

use thicket_render::{Point, Rect, Size};

use crate::theme::Theme;
use crate::widget::{CanvasObject, WidgetBase};

use super::TreeNodeId;

/// The two row shapes. Rows of different shapes never share a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    /// A row with an expander icon.
    Branch,
    /// A row without children.
    Leaf,
}

impl NodeShape {
    /// Get the shape for a branch flag.
    #[inline]
    pub fn from_branch(branch: bool) -> Self {
        if branch { Self::Branch } else { Self::Leaf }
    }

    /// Check if this is the branch shape.
    #[inline]
    pub fn is_branch(self) -> bool {
        self == Self::Branch
    }
}

/// Highlight drawn in a row's leading indicator strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowIndicator {
    /// Background colour.
    #[default]
    None,
    /// The pointer is over the row.
    Hovered,
    /// The row is the selection. Wins over hover.
    Selected,
}

/// State shared by both row shapes.
///
/// Child geometry is relative to the row: a `padding`-wide indicator strip,
/// then the indent, then the icon slot, then the content, each separated by
/// `padding`. Leaves reserve the icon slot too so that siblings of mixed
/// shapes line up.
#[derive(Debug)]
pub struct TreeNode<C> {
    base: WidgetBase,
    uid: TreeNodeId,
    depth: usize,
    indicator: RowIndicator,
    content: Option<C>,
    theme: Theme,
}

impl<C: CanvasObject> TreeNode<C> {
    fn new(mut content: Option<C>, theme: Theme) -> Self {
        if let Some(content) = content.as_mut() {
            content.set_theme(&theme);
        }
        Self {
            base: WidgetBase::new(),
            uid: TreeNodeId::new(),
            depth: 0,
            indicator: RowIndicator::None,
            content,
            theme,
        }
    }

    /// The node this row currently displays.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Visual depth; top-level rows are at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Horizontal inset for this row's depth.
    pub fn indent(&self) -> f32 {
        self.depth as f32 * self.theme.indent_step()
    }

    /// The caller's content drawable, if a template factory was set.
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Mutable access to the content drawable.
    pub fn content_mut(&mut self) -> Option<&mut C> {
        self.content.as_mut()
    }

    /// Current highlight.
    pub fn indicator(&self) -> RowIndicator {
        self.indicator
    }

    pub(crate) fn set_indicator(&mut self, indicator: RowIndicator) {
        if self.indicator != indicator {
            self.indicator = indicator;
            self.base.update();
        }
    }

    /// Bind the row to a node and make it visible.
    pub(crate) fn bind(&mut self, uid: &str, depth: usize) {
        if self.uid != uid {
            self.uid.clear();
            self.uid.push_str(uid);
            self.base.update();
        }
        if self.depth != depth {
            self.depth = depth;
            self.layout_children();
            self.base.update();
        }
        self.base.show();
    }

    /// The indicator strip along the leading edge.
    pub fn indicator_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.theme.padding, self.base.size().height)
    }

    /// The expander icon slot.
    pub fn icon_rect(&self) -> Rect {
        let padding = self.theme.padding;
        Rect::new(
            padding + self.indent(),
            padding,
            self.theme.icon_inline_size,
            (self.base.size().height - 2.0 * padding).max(0.0),
        )
    }

    /// The area given to the content drawable.
    pub fn content_rect(&self) -> Rect {
        let padding = self.theme.padding;
        let icon = self.icon_rect();
        let x = icon.right() + padding;
        Rect::new(
            x,
            padding,
            (self.base.size().width - x - padding).max(0.0),
            icon.height(),
        )
    }

    fn layout_children(&mut self) {
        let rect = self.content_rect();
        if let Some(content) = self.content.as_mut() {
            content.move_to(rect.origin);
            content.resize(rect.size);
        }
    }

    fn measure(&self) -> Size {
        let content = self
            .content
            .as_ref()
            .map(CanvasObject::min_size)
            .unwrap_or(Size::ZERO);
        let padding = self.theme.padding;
        let icon = self.theme.icon_inline_size;
        Size::new(
            content.width + self.indent() + icon + 3.0 * padding,
            content.height.max(icon) + 2.0 * padding,
        )
    }
}

impl<C: CanvasObject> CanvasObject for TreeNode<C> {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn min_size(&self) -> Size {
        self.measure()
    }

    fn resize(&mut self, size: Size) {
        if self.base.size() != size {
            self.base.set_size(size);
            self.layout_children();
        }
    }

    fn refresh(&mut self) {
        if let Some(content) = self.content.as_mut() {
            content.refresh();
        }
        self.base.update();
    }
}

/// A pooled tree row.
///
/// Branch and leaf rows share every field through [`TreeNode`]; branches
/// additionally track whether their expander shows the open state.
#[derive(Debug)]
pub enum TreeRow<C> {
    /// A row for a branch node.
    Branch {
        /// Shared row state.
        node: TreeNode<C>,
        /// Whether the expander shows the branch as open.
        expanded: bool,
    },
    /// A row for a leaf node.
    Leaf(TreeNode<C>),
}

impl<C: CanvasObject> TreeRow<C> {
    /// Create an unbound row of the given shape.
    pub fn new(shape: NodeShape, content: Option<C>, theme: Theme) -> Self {
        let node = TreeNode::new(content, theme);
        match shape {
            NodeShape::Branch => Self::Branch {
                node,
                expanded: false,
            },
            NodeShape::Leaf => Self::Leaf(node),
        }
    }

    /// This row's shape.
    pub fn shape(&self) -> NodeShape {
        match self {
            Self::Branch { .. } => NodeShape::Branch,
            Self::Leaf(_) => NodeShape::Leaf,
        }
    }

    /// Shared row state.
    pub fn node(&self) -> &TreeNode<C> {
        match self {
            Self::Branch { node, .. } | Self::Leaf(node) => node,
        }
    }

    /// Mutable shared row state.
    pub fn node_mut(&mut self) -> &mut TreeNode<C> {
        match self {
            Self::Branch { node, .. } | Self::Leaf(node) => node,
        }
    }

    /// Whether the expander shows the open state. Always `false` for leaves.
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Branch { expanded: true, .. })
    }

    pub(crate) fn set_expanded(&mut self, open: bool) {
        if let Self::Branch { node, expanded } = self {
            if *expanded != open {
                *expanded = open;
                node.base.update();
            }
        }
    }

    /// Check if a row-local point falls on the expander icon.
    pub fn expander_contains(&self, point: Point) -> bool {
        match self {
            Self::Branch { node, .. } => node.icon_rect().contains(point),
            Self::Leaf(_) => false,
        }
    }
}

impl<C: CanvasObject> CanvasObject for TreeRow<C> {
    fn widget_base(&self) -> &WidgetBase {
        &self.node().base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.node_mut().base
    }

    fn min_size(&self) -> Size {
        self.node().min_size()
    }

    fn resize(&mut self, size: Size) {
        self.node_mut().resize(size);
    }

    fn refresh(&mut self) {
        self.node_mut().refresh();
    }
}
